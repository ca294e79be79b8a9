//! Sentence splitting
//!
//! Boundaries are decided per chunk on tokenized text. A chunk from the
//! XML chunker may already carry boundaries seeded at eos tags; the
//! punctuation pass only adds to them.

mod merge;
mod splitter;
mod xml_tags;

pub use merge::merge_empty_sentences;
pub use splitter::SentenceSplitter;
pub use xml_tags::{add_xml_tags, SentenceTagger};
