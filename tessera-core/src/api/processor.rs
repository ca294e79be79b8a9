//! Main tokenizer implementation

use std::collections::HashSet;
use std::io::Read;

use log::{debug, trace, warn};

use crate::alignment;
use crate::api::paragraphs::{split_paragraphs, ParagraphSeparator};
use crate::api::Config;
use crate::error::{Error, Result};
use crate::processing::map_ordered;
use crate::sentence::{add_xml_tags, merge_empty_sentences, SentenceSplitter};
use crate::token::Token;
use crate::token_list::TokenList;
use crate::tokenizer::RulePipeline;
use crate::xml::{escape_xml_tokens, Chunk, XmlChunker, DEFAULT_EOS_TAGS};

/// Options for XML input
#[derive(Debug, Clone)]
pub struct XmlOptions {
    /// Elements that always delimit sentences
    pub eos_tags: HashSet<String>,
    /// Drop all markup from the output
    pub strip_tags: bool,
    /// Elements removed together with their content before tokenization
    pub prune_tags: HashSet<String>,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            eos_tags: DEFAULT_EOS_TAGS.iter().map(|t| t.to_string()).collect(),
            strip_tags: false,
            prune_tags: HashSet::new(),
        }
    }
}

impl XmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the eos tag set
    pub fn eos_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.eos_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn strip_tags(mut self, strip: bool) -> Self {
        self.strip_tags = strip;
        self
    }

    pub fn prune_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prune_tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A chunk together with the buffer its offsets refer to
struct Job<'a> {
    raw: &'a str,
    chunk: Chunk,
}

/// Tokenizer and sentence splitter
///
/// Compiled patterns and word lists are built once on construction and
/// shared by all worker threads.
pub struct Tokenizer {
    config: Config,
    pipeline: RulePipeline,
    splitter: Option<SentenceSplitter>,
}

impl Tokenizer {
    /// Create a tokenizer with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let pipeline = RulePipeline::new(
            config.language,
            config.split_camel_case,
            &config.custom_abbreviations,
        )?;
        let splitter = if config.split_sentences {
            Some(SentenceSplitter::new(config.language)?)
        } else {
            None
        };
        debug!(
            "Tokenizer ready: language={}, split_sentences={}, parallel={}",
            config.language, config.split_sentences, config.parallel
        );
        Ok(Self {
            config,
            pipeline,
            splitter,
        })
    }

    /// Create a tokenizer for a language with otherwise default settings
    pub fn for_language(code: impl Into<String>) -> Result<Self> {
        let config = Config::builder().language(code)?.build()?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tokenize paragraphs given one per string
    ///
    /// Character offsets are relative to the respective paragraph.
    pub fn tokenize_text<S: AsRef<str>>(&self, paragraphs: &[S]) -> Result<Vec<Vec<Token>>> {
        let jobs = paragraphs
            .iter()
            .map(|p| Job {
                raw: p.as_ref(),
                chunk: Chunk::paragraph(p.as_ref(), 0),
            })
            .collect();
        self.tokenize_text_jobs(jobs)
    }

    /// Split `text` into paragraphs and tokenize them
    ///
    /// Character offsets are relative to `text`.
    pub fn tokenize_text_str(
        &self,
        text: &str,
        separator: ParagraphSeparator,
    ) -> Result<Vec<Vec<Token>>> {
        let jobs = split_paragraphs(text, separator)
            .into_iter()
            .map(|(offset, paragraph)| Job {
                raw: text,
                chunk: Chunk::paragraph(paragraph, offset),
            })
            .collect();
        self.tokenize_text_jobs(jobs)
    }

    /// Read plain text to the end and tokenize it
    pub fn tokenize_text_reader<R: Read>(
        &self,
        mut reader: R,
        separator: ParagraphSeparator,
    ) -> Result<Vec<Vec<Token>>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.tokenize_text_str(&text, separator)
    }

    /// Tokenize an XML document
    ///
    /// Fails without output if the document is not well-formed.
    pub fn tokenize_xml(&self, xml: &str, options: &XmlOptions) -> Result<Vec<Vec<Token>>> {
        if !options.prune_tags.is_empty() && self.config.character_offsets {
            return Err(Error::Configuration(
                "prune_tags cannot be combined with character_offsets".into(),
            ));
        }
        if options.eos_tags.is_empty() {
            warn!("No eos tags configured; the document is processed as a single chunk");
        }

        let chunks = XmlChunker::new(xml, &options.eos_tags, &options.prune_tags)
            .with_offsets(self.config.character_offsets)
            .collect::<Result<Vec<_>>>()?;
        debug!("XML input split into {} chunks", chunks.len());

        let jobs = chunks
            .into_iter()
            .map(|chunk| Job { raw: xml, chunk })
            .collect();
        let escape = !(options.strip_tags && self.config.xml_sentences.is_none());
        self.run(jobs, options.strip_tags, escape)
    }

    /// Read an XML document to the end and tokenize it
    pub fn tokenize_xml_reader<R: Read>(
        &self,
        mut reader: R,
        options: &XmlOptions,
    ) -> Result<Vec<Vec<Token>>> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        self.tokenize_xml(&xml, options)
    }

    fn tokenize_text_jobs(&self, jobs: Vec<Job<'_>>) -> Result<Vec<Vec<Token>>> {
        debug!("Text input split into {} paragraphs", jobs.len());
        let escape = self.config.xml_sentences.is_some();
        self.run(jobs, false, escape)
    }

    /// Process all chunks, then apply the document-level steps
    fn run(&self, jobs: Vec<Job<'_>>, strip_tags: bool, escape: bool) -> Result<Vec<Vec<Token>>> {
        let per_chunk = map_ordered(jobs, self.config.parallel, |job| {
            self.process_chunk(job.raw, job.chunk)
        })?;
        let units = per_chunk.into_iter().flatten();

        let mut sentences = if self.splitter.is_some() {
            merge_empty_sentences(units)
        } else {
            units.collect()
        };

        if strip_tags {
            for sentence in &mut sentences {
                sentence.retain(|t| !t.markup);
            }
            sentences.retain(|s| !s.is_empty());
        }

        if let (Some(_), Some(tag)) = (&self.splitter, &self.config.xml_sentences) {
            sentences = add_xml_tags(sentences, tag);
        }

        if escape {
            sentences = sentences.into_iter().map(escape_xml_tokens).collect();
        }
        Ok(sentences)
    }

    /// Tokenize, align and sentence split a single chunk
    fn process_chunk(&self, raw: &str, chunk: Chunk) -> Result<Vec<Vec<Token>>> {
        let Chunk { tokens, sources } = chunk;
        let mut list: TokenList = tokens.into_iter().collect();
        self.pipeline.tokenize(&mut list)?;
        let mut tokens = list.into_vec();
        trace!("Chunk tokenized into {} tokens", tokens.len());

        if self.config.character_offsets {
            alignment::token_offsets(raw, &sources, &mut tokens)?;
        }

        Ok(match &self.splitter {
            Some(splitter) => splitter.split(tokens),
            None if tokens.is_empty() => Vec::new(),
            None => vec![tokens],
        })
    }
}
