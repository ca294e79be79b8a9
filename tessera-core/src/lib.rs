//! Rule-based tokenization and sentence splitting for German and English
//! web text
//!
//! The crate turns plain text or XML into sequences of [`Token`]s grouped
//! into sentences. Tokenization is a fixed, language-specific cascade of
//! pattern rules that recognizes URLs, emoticons, abbreviations, dates,
//! numbers and the like before splitting off punctuation. Sentence
//! splitting is a light-weight heuristic over the resulting tokens.
//!
//! # Architecture
//!
//! - **Token model**: [`Token`] and the arena-backed [`TokenList`]
//! - **Rule pipeline**: ordered pattern rules per [`Language`]
//! - **Sentence splitter**: boundary flags, markup merging, `<s>` tags
//! - **XML chunker**: splits documents at sentence-delimiting elements
//! - **Alignment**: maps tokens back to byte spans of the input
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Config, ParagraphSeparator, Tokenizer};
//!
//! let config = Config::builder().language("de").unwrap().build().unwrap();
//! let tokenizer = Tokenizer::with_config(config).unwrap();
//!
//! let sentences = tokenizer
//!     .tokenize_text_str("Heyi:)\n\nWas machst du morgen Abend?!", ParagraphSeparator::EmptyLines)
//!     .unwrap();
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[0][1].text, ":)");
//! ```

pub mod alignment;
pub mod api;
pub mod error;
pub mod language;
pub mod processing;
pub mod sentence;
pub mod token;
pub mod token_list;
pub mod tokenizer;
pub mod xml;

pub use api::{Config, ConfigBuilder, ParagraphSeparator, Tokenizer, XmlOptions};
pub use error::{Error, Result};
pub use language::Language;
pub use sentence::SentenceSplitter;
pub use token::{MarkupClass, Token, TokenClass};
pub use token_list::{NodeId, TokenList, TokenListError};
pub use tokenizer::RulePipeline;
pub use xml::{XmlChunker, DEFAULT_EOS_TAGS};
