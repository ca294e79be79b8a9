//! Splitting an XML document into independently processable chunks
//!
//! Chunks end at eos tags, i.e. elements that always delimit sentences
//! (paragraphs, headings, line breaks). Character data between two tags
//! becomes one text token; every tag becomes a locked markup token.

use super::escape::{escape_attribute, unescape};
use crate::error::{Error, Result};
use crate::token::{MarkupClass, Token};
use log::trace;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use smallvec::SmallVec;
use std::collections::{HashSet, VecDeque};
use std::mem;

/// Elements that end a chunk unless configured otherwise
pub const DEFAULT_EOS_TAGS: &[&str] = &[
    "title", "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "div", "ol", "ul", "dl", "table",
];

/// How the raw bytes of a piece map to its characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    /// Character data that may contain references
    Escaped,
    /// Taken literally (CDATA sections, plain text)
    Verbatim,
}

/// A byte span of the raw input contributing to a text token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub start: usize,
    pub end: usize,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(start: usize, end: usize, kind: PieceKind) -> Self {
        Self { start, end, kind }
    }
}

/// Raw spans of one token; empty for markup
pub type Source = SmallVec<[Piece; 1]>;

/// Tokens of one chunk together with where their text came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    pub tokens: Vec<Token>,
    /// One entry per token
    pub sources: Vec<Source>,
}

impl Chunk {
    /// A single paragraph of plain text starting at byte `offset`
    pub fn paragraph(text: &str, offset: usize) -> Self {
        let mut source = Source::new();
        source.push(Piece::new(offset, offset + text.len(), PieceKind::Verbatim));
        Self {
            tokens: vec![Token::new(text).with_sentence_flags(true, true)],
            sources: vec![source],
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Chunk contains at least one non-markup token with visible text
    pub fn has_content(&self) -> bool {
        self.tokens.iter().any(|t| !t.markup && has_content(&t.text))
    }
}

fn has_content(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace())
}

/// Iterator over the chunks of an XML document
///
/// Parsing is lazy; a syntax error is reported when the chunk containing
/// it is requested, after which the iterator is exhausted.
pub struct XmlChunker<'a> {
    input: &'a str,
    reader: Reader<&'a [u8]>,
    eos_tags: HashSet<String>,
    prune_tags: HashSet<String>,
    record_offsets: bool,
    /// End of the last event
    cursor: usize,
    depth: usize,
    seen_root: bool,
    text: String,
    text_source: Source,
    current: Chunk,
    content_tokens: usize,
    /// Next content token starts a sentence
    bos: bool,
    /// An eos element was closed and no content followed yet
    eos: bool,
    ready: VecDeque<Chunk>,
    done: bool,
}

impl<'a> XmlChunker<'a> {
    pub fn new(input: &'a str, eos_tags: &HashSet<String>, prune_tags: &HashSet<String>) -> Self {
        Self {
            input,
            reader: Reader::from_str(input),
            eos_tags: eos_tags.clone(),
            prune_tags: prune_tags.clone(),
            record_offsets: false,
            cursor: 0,
            depth: 0,
            seen_root: false,
            text: String::new(),
            text_source: Source::new(),
            current: Chunk::default(),
            content_tokens: 0,
            bos: true,
            eos: false,
            ready: VecDeque::new(),
            done: false,
        }
    }

    /// Attach the raw byte span to every markup token
    pub fn with_offsets(mut self, record_offsets: bool) -> Self {
        self.record_offsets = record_offsets;
        self
    }

    fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::MalformedXml {
            position: self.cursor,
            reason: reason.into(),
        }
    }

    /// Consume one parser event
    fn step(&mut self) -> Result<()> {
        let event = self.reader.read_event()?;
        let position = self.reader.buffer_position() as usize;

        match event {
            Event::Text(text) => {
                let start = self.cursor;
                let end = start + text.len();
                self.cursor = end;
                let raw = self.input.get(start..end).unwrap_or_default();
                if self.depth == 0 {
                    if has_content(raw) {
                        return Err(self.malformed("text outside the root element"));
                    }
                    return Ok(());
                }
                self.text.push_str(&unescape(raw)?);
                self.text_source
                    .push(Piece::new(start, end, PieceKind::Escaped));
            }
            Event::CData(cdata) => {
                self.cursor = position;
                if self.depth == 0 {
                    return Err(self.malformed("CDATA outside the root element"));
                }
                let end = position.saturating_sub(3);
                let start = end.saturating_sub(cdata.len());
                self.text.push_str(self.input.get(start..end).unwrap_or_default());
                self.text_source
                    .push(Piece::new(start, end, PieceKind::Verbatim));
            }
            Event::Start(element) => {
                let start = self.tag_start(position);
                self.cursor = position;
                self.open_root()?;
                let name = element_name(element.name());
                if self.prune_tags.contains(&name) {
                    let qname = element.name().as_ref().to_vec();
                    self.reader.read_to_end(QName(&qname))?;
                    self.cursor = self.reader.buffer_position() as usize;
                    return Ok(());
                }
                self.depth += 1;
                let tag = render_start_tag(&element, &name)?;
                self.flush_text();
                self.push_tag(tag, MarkupClass::Start, &name, (start, position));
            }
            Event::Empty(element) => {
                let start = self.tag_start(position);
                self.cursor = position;
                self.open_root()?;
                let name = element_name(element.name());
                if self.prune_tags.contains(&name) {
                    return Ok(());
                }
                let tag = render_start_tag(&element, &name)?;
                self.flush_text();
                self.push_tag(tag, MarkupClass::Start, &name, (start, position));
                self.push_tag(
                    format!("</{name}>"),
                    MarkupClass::End,
                    &name,
                    (position, position),
                );
            }
            Event::End(element) => {
                let start = self.tag_start(position);
                self.cursor = position;
                let name = element_name(element.name());
                self.depth = self.depth.saturating_sub(1);
                self.flush_text();
                self.push_tag(format!("</{name}>"), MarkupClass::End, &name, (start, position));
            }
            Event::Eof => {
                if self.depth > 0 {
                    return Err(self.malformed(format!("{} unclosed element(s)", self.depth)));
                }
                if !self.seen_root {
                    return Err(self.malformed("no root element"));
                }
                self.flush_text();
                if !self.current.is_empty() {
                    let chunk = mem::take(&mut self.current);
                    self.ready.push_back(chunk);
                }
                self.done = true;
            }
            // comments, processing instructions, declarations
            _ => self.cursor = position,
        }
        Ok(())
    }

    /// Byte offset of the `<` opening a tag that ends at `end`
    fn tag_start(&self, end: usize) -> usize {
        self.input
            .get(..end)
            .and_then(|head| head.rfind('<'))
            .unwrap_or(self.cursor)
    }

    fn open_root(&mut self) -> Result<()> {
        if self.depth == 0 {
            if self.seen_root {
                return Err(self.malformed("more than one root element"));
            }
            self.seen_root = true;
        }
        Ok(())
    }

    /// Emit the buffered character data as one token
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let mut token = Token::new(mem::take(&mut self.text));
        let source = mem::take(&mut self.text_source);
        if has_content(&token.text) {
            if self.eos {
                self.eos = false;
                self.finish_chunk();
            }
            if self.bos {
                self.bos = false;
                token.first_in_sentence = true;
                self.content_tokens += 1;
            }
        }
        self.current.tokens.push(token);
        self.current.sources.push(source);
    }

    fn push_tag(&mut self, text: String, class: MarkupClass, name: &str, span: (usize, usize)) {
        let is_eos = self.eos_tags.contains(name);
        if is_eos {
            self.bos = true;
            if let Some(last) = self
                .current
                .tokens
                .iter_mut()
                .rev()
                .find(|t| !t.markup && has_content(&t.text))
            {
                last.last_in_sentence = true;
            }
            match class {
                MarkupClass::Start => {
                    self.eos = false;
                    self.finish_chunk();
                }
                MarkupClass::End => self.eos = true,
            }
        } else if self.eos && class == MarkupClass::Start {
            self.eos = false;
            self.finish_chunk();
        }

        let mut token = Token::markup(text, class, is_eos);
        if self.record_offsets {
            token.character_offset = Some(span);
        }
        self.current.tokens.push(token);
        self.current.sources.push(Source::new());
    }

    /// Hand the current chunk out if it holds content
    fn finish_chunk(&mut self) {
        if self.content_tokens == 0 {
            return;
        }
        self.content_tokens = 0;
        let chunk = mem::take(&mut self.current);
        trace!("XML chunk with {} tokens", chunk.len());
        self.ready.push_back(chunk);
    }
}

impl Iterator for XmlChunker<'_> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(Ok(chunk));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.step() {
                self.done = true;
                self.ready.clear();
                return Some(Err(e));
            }
        }
    }
}

fn element_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

/// `<name key="value">` with normalized quoting and escaping
fn render_start_tag(element: &BytesStart<'_>, name: &str) -> Result<String> {
    let mut tag = format!("<{name}");
    for attribute in element.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref());
        let value = attribute.unescape_value()?;
        tag.push_str(&format!(" {key}=\"{}\"", escape_attribute(&value)));
    }
    tag.push('>');
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eos(tags: &[&str]) -> HashSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn chunks(xml: &str, eos_tags: &[&str], prune: &[&str]) -> Vec<Vec<String>> {
        XmlChunker::new(xml, &eos(eos_tags), &eos(prune))
            .map(|chunk| {
                chunk
                    .unwrap()
                    .tokens
                    .into_iter()
                    .map(|t| t.text)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_chunks_at_eos_tags() {
        assert_eq!(
            chunks("<foo><p>hallo</p>du</foo>", &["p"], &[]),
            vec![vec!["<foo>", "<p>", "hallo", "</p>"], vec!["du", "</foo>"]]
        );
    }

    #[test]
    fn test_empty_eos_elements_stay_with_next_chunk() {
        assert_eq!(
            chunks("<foo><p></p><p>hallo</p>du</foo>", &["p"], &[]),
            vec![
                vec!["<foo>", "<p>", "</p>", "<p>", "hallo", "</p>"],
                vec!["du", "</foo>"]
            ]
        );
    }

    #[test]
    fn test_self_closing_element() {
        assert_eq!(
            chunks("<foo>Foo<br/>bar</foo>", &["br"], &[]),
            vec![vec!["<foo>", "Foo"], vec!["<br>", "</br>", "bar", "</foo>"]]
        );
    }

    #[test]
    fn test_prune_joins_surrounding_text() {
        assert_eq!(
            chunks("<x>bar\n  <del>foo</del>\nbaz</x>", &["p"], &["del"]),
            vec![vec!["<x>", "bar\n  \nbaz", "</x>"]]
        );
    }

    #[test]
    fn test_attributes_are_normalized() {
        assert_eq!(
            chunks("<a href='x&amp;y' id=\"1\">t</a>", &[], &[]),
            vec![vec!["<a href=\"x&amp;y\" id=\"1\">", "t", "</a>"]]
        );
    }

    #[test]
    fn test_entities_and_cdata_are_decoded() {
        assert_eq!(
            chunks("<a>x &lt; y<![CDATA[ & z]]></a>", &[], &[]),
            vec![vec!["<a>", "x < y & z", "</a>"]]
        );
    }

    #[test]
    fn test_sentence_flags_at_eos_tags() {
        let chunk = XmlChunker::new("<p>eins zwei</p>", &eos(&["p"]), &eos(&[]))
            .next()
            .unwrap()
            .unwrap();
        assert!(chunk.tokens[1].first_in_sentence);
        assert!(chunk.tokens[1].last_in_sentence);
    }

    #[test]
    fn test_markup_offsets() {
        let xml = "<foo>a<br/></foo>";
        let chunks: Vec<Chunk> = XmlChunker::new(xml, &eos(&[]), &eos(&[]))
            .with_offsets(true)
            .collect::<Result<_>>()
            .unwrap();
        let tokens = &chunks[0].tokens;
        assert_eq!(tokens[0].character_offset, Some((0, 5)));
        assert_eq!(tokens[2].character_offset, Some((6, 11)));
        assert_eq!(tokens[3].character_offset, Some((11, 11)));
        assert_eq!(tokens[4].character_offset, Some((11, 17)));
        assert_eq!(chunks[0].sources[1][0], Piece::new(5, 6, PieceKind::Escaped));
    }

    #[test]
    fn test_malformed_input() {
        let malformed = [
            "<a><b></a>",
            "<a>",
            "<a>&bogus;</a>",
            "<a></a>trailing",
            "<a></a><b></b>",
        ];
        for xml in malformed {
            let result: Result<Vec<Chunk>> = XmlChunker::new(xml, &eos(&[]), &eos(&[])).collect();
            assert!(result.is_err(), "{xml} was accepted");
        }
    }
}
