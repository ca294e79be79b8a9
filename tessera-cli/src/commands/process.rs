//! Process command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tessera_core::{Config, ParagraphSeparator, Token, Tokenizer, XmlOptions};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{FileReader, InputSource};
use crate::output::{FormatOptions, JsonFormatter, OutputFormatter, TextFormatter};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input file (UTF-8) or "-" to read from standard input
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Language code or alias: de-web, en-formal, de, en, de_CMC, en_PTB
    #[arg(short, long)]
    pub language: Option<String>,

    /// How paragraphs are separated in plain text input
    #[arg(
        short = 's',
        long,
        value_parser = ["empty_lines", "single_newlines"]
    )]
    pub paragraph_separator: Option<String>,

    /// The input is an XML document
    #[arg(short = 'x', long)]
    pub xml: bool,

    /// Element that always delimits sentences; repeatable, implies --xml
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Element removed with its content before tokenization; repeatable, implies --xml
    #[arg(long = "prune", value_name = "TAG")]
    pub prune: Vec<String>,

    /// Suppress XML tags in the output; implies --xml
    #[arg(long)]
    pub strip_tags: bool,

    /// Split words written in camelCase
    #[arg(short = 'c', long)]
    pub split_camel_case: bool,

    /// Also split the input into sentences
    #[arg(long)]
    pub split_sentences: bool,

    /// Delimit sentences with this XML element instead of empty lines; implies --split-sentences
    #[arg(long, value_name = "TAG")]
    pub sentence_tag: Option<String>,

    /// Output token classes
    #[arg(short = 't', long)]
    pub token_classes: bool,

    /// Output SpaceAfter=No and OriginalSpelling information
    #[arg(short = 'e', long)]
    pub extra_info: bool,

    /// Output byte offsets of each token in the input
    #[arg(long)]
    pub character_offsets: bool,

    /// Number of worker threads (0 = one per CPU)
    #[arg(long, value_name = "N")]
    pub parallel: Option<usize>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File with additional abbreviations, one per line
    #[arg(long, value_name = "FILE")]
    pub abbreviations: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One token per line, sentences separated by empty lines
    Text,
    /// JSON array of sentences, each an array of tokens
    Json,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting tokenization");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        self.check_conflicts()?;

        let config = self.build_config(&file_config)?;
        let tokenizer = Tokenizer::with_config(config).map_err(CliError::from)?;

        let source = InputSource::parse(&self.input);
        log::info!("Reading {}", source.display_name());
        let content = source.read_to_string()?;

        let start = Instant::now();
        let sentences = if self.is_xml() {
            tokenizer.tokenize_xml(&content, &self.xml_options(&file_config))
        } else {
            tokenizer.tokenize_text_str(&content, self.paragraph_separator()?)
        }
        .map_err(CliError::from)?;
        let elapsed = start.elapsed();

        let mut formatter = self.create_formatter()?;
        for sentence in &sentences {
            formatter.write_sentence(sentence)?;
        }
        formatter.finish()?;

        self.log_summary(&sentences, elapsed.as_secs_f64());
        Ok(())
    }

    /// XML input was requested directly or through an XML-only option
    pub fn is_xml(&self) -> bool {
        self.xml || self.strip_tags || !self.tags.is_empty() || !self.prune.is_empty()
    }

    /// Sentence splitting was requested directly or through `--sentence-tag`
    pub fn splits_sentences(&self) -> bool {
        self.split_sentences || self.sentence_tag.is_some()
    }

    /// Reject option combinations that cannot be honored
    pub fn check_conflicts(&self) -> Result<()> {
        if self.is_xml() && self.paragraph_separator.is_some() {
            return Err(CliError::ConflictingOptions(
                "--paragraph-separator applies to plain text input only".to_string(),
            )
            .into());
        }
        if !self.prune.is_empty() && self.character_offsets {
            return Err(CliError::ConflictingOptions(
                "--prune cannot be combined with --character-offsets".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Merge command-line options over the configuration file
    pub fn build_config(&self, file_config: &CliConfig) -> Result<Config> {
        let processing = &file_config.processing;
        let language = self.language.as_deref().unwrap_or(&processing.language);

        let mut abbreviations = processing.custom_abbreviations.clone();
        if let Some(path) = &self.abbreviations {
            abbreviations.extend(FileReader::read_word_list(path)?);
        }

        let workers = match self.parallel.unwrap_or(file_config.performance.parallel) {
            0 => num_cpus::get(),
            n => n,
        };

        let mut builder = Config::builder()
            .language(language)
            .map_err(CliError::from)?
            .split_camel_case(self.split_camel_case || processing.split_camel_case)
            .split_sentences(self.splits_sentences())
            .character_offsets(self.character_offsets)
            .custom_abbreviations(abbreviations)
            .parallel(workers);
        if let Some(tag) = &self.sentence_tag {
            builder = builder.xml_sentences(tag.as_str());
        }
        Ok(builder.build().map_err(CliError::from)?)
    }

    /// XML options; command-line tags replace those of the configuration file
    pub fn xml_options(&self, file_config: &CliConfig) -> XmlOptions {
        let mut options = XmlOptions::default().strip_tags(self.strip_tags);
        if !self.tags.is_empty() {
            options = options.eos_tags(self.tags.iter().cloned());
        } else if !file_config.xml.eos_tags.is_empty() {
            options = options.eos_tags(file_config.xml.eos_tags.iter().cloned());
        }
        let prune = if self.prune.is_empty() {
            &file_config.xml.prune_tags
        } else {
            &self.prune
        };
        options.prune_tags(prune.iter().cloned())
    }

    fn paragraph_separator(&self) -> Result<ParagraphSeparator> {
        match &self.paragraph_separator {
            Some(name) => Ok(name.parse().map_err(CliError::from)?),
            None => Ok(ParagraphSeparator::default()),
        }
    }

    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            token_classes: self.token_classes,
            extra_info: self.extra_info,
            character_offsets: self.character_offsets,
            sentence_breaks: self.splits_sentences() && self.sentence_tag.is_none(),
        }
    }

    /// Create the formatter for the selected format and destination
    fn create_formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };

        let options = self.format_options();
        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer, options)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, options)),
        })
    }

    fn log_summary(&self, sentences: &[Vec<Token>], seconds: f64) {
        let tokens = sentences.iter().flatten().filter(|t| !t.markup).count();
        let rate = if seconds > 0.0 {
            tokens as f64 / seconds
        } else {
            0.0
        };
        if self.splits_sentences() {
            log::info!(
                "Tokenized {tokens} tokens ({} sentences) in {seconds:.2} seconds ({rate:.0} tokens/s)",
                sentences.len()
            );
        } else {
            log::info!("Tokenized {tokens} tokens in {seconds:.2} seconds ({rate:.0} tokens/s)");
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }

        Ok(())
    }
}
