//! Public API for tokenization and sentence splitting
//!
//! Wraps the rule pipeline, the XML chunker, alignment and the sentence
//! splitter behind a single [`Tokenizer`] configured through
//! [`ConfigBuilder`].

mod config;
mod paragraphs;
mod processor;


pub use config::{Config, ConfigBuilder};
pub use paragraphs::{split_paragraphs, ParagraphSeparator};
pub use processor::{Tokenizer, XmlOptions};
