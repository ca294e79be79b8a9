//! Error types for tokenization

use crate::token_list::TokenListError;
use thiserror::Error;

/// Error type for all library operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Structural XML problem not reported by the parser itself
    #[error("Malformed XML at byte {position}: {reason}")]
    MalformedXml { position: usize, reason: String },

    /// A token could not be located in the normalized input
    #[error("Alignment error at byte {position}: cannot locate {token:?}")]
    Alignment { token: String, position: usize },

    /// Invalid configuration parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unknown language code
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage { code: String },

    /// Unknown paragraph separator
    #[error("Unsupported paragraph separator: {name}")]
    UnsupportedParagraphSeparator { name: String },

    /// Operation on an empty token list
    #[error("Token list error: {0}")]
    TokenList(#[from] TokenListError),

    /// Failure while reading input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be built
    #[error("Parallel processing failed")]
    Parallel {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<fancy_regex::Error> for Error {
    fn from(error: fancy_regex::Error) -> Self {
        Error::Configuration(format!("invalid pattern: {error}"))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::InvalidAttr(error))
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(error: quick_xml::escape::EscapeError) -> Self {
        Error::Xml(quick_xml::Error::Escape(error))
    }
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;
