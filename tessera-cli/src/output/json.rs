//! JSON output formatter

use super::{FormatOptions, OutputFormatter};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tessera_core::Token;

/// JSON formatter - outputs sentences as a JSON array of token arrays
pub struct JsonFormatter<W: Write> {
    writer: W,
    options: FormatOptions,
    sentences: Vec<Vec<TokenData>>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenData {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_after: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_spelling: Option<String>,
    /// Half-open byte span into the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<(usize, usize)>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            sentences: Vec::new(),
        }
    }

    fn token_data(&self, token: &Token) -> TokenData {
        let annotate = !token.markup;
        TokenData {
            text: token.text.clone(),
            token_class: (annotate && self.options.token_classes)
                .then(|| token.token_class.to_string()),
            space_after: (annotate && self.options.extra_info).then_some(token.space_after),
            original_spelling: if annotate && self.options.extra_info {
                token.original_spelling.clone()
            } else {
                None
            },
            offset: if self.options.character_offsets {
                token.character_offset
            } else {
                None
            },
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn write_sentence(&mut self, sentence: &[Token]) -> Result<()> {
        let tokens = sentence.iter().map(|t| self.token_data(t)).collect();
        self.sentences.push(tokens);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
