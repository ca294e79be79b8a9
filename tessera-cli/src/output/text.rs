//! Plain text output formatter

use super::{FormatOptions, OutputFormatter};
use anyhow::Result;
use std::io::Write;
use tessera_core::Token;

/// Plain text formatter - outputs one token per line
///
/// Optional columns are tab-separated in the order token class, extra
/// information, start offset and end offset. Markup tokens never get the
/// class or extra columns.
pub struct TextFormatter<W: Write> {
    writer: W,
    options: FormatOptions,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self { writer, options }
    }

    fn write_token(&mut self, token: &Token) -> Result<()> {
        write!(self.writer, "{}", token.text)?;
        if !token.markup {
            if self.options.token_classes {
                write!(self.writer, "\t{}", token.token_class)?;
            }
            if self.options.extra_info {
                write!(self.writer, "\t{}", token.extra_info())?;
            }
        }
        if self.options.character_offsets {
            if let Some((start, end)) = token.character_offset {
                write!(self.writer, "\t{start}\t{end}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn write_sentence(&mut self, sentence: &[Token]) -> Result<()> {
        for token in sentence {
            self.write_token(token)?;
        }
        if self.options.sentence_breaks {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
