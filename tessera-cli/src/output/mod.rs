//! Output formatting module

use anyhow::Result;
use tessera_core::Token;

/// Which token attributes are written besides the text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Write the token class of non-markup tokens
    pub token_classes: bool,
    /// Write `SpaceAfter=No` and `OriginalSpelling="…"`
    pub extra_info: bool,
    /// Write byte offsets into the input
    pub character_offsets: bool,
    /// Separate sentences by an empty line (text output only)
    pub sentence_breaks: bool,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single sentence
    fn write_sentence(&mut self, sentence: &[Token]) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
