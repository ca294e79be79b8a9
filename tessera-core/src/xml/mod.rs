//! XML input and output

mod chunker;
mod escape;

pub use chunker::{Chunk, Piece, PieceKind, Source, XmlChunker, DEFAULT_EOS_TAGS};
pub use escape::{decode_with_spans, escape_attribute, escape_text, escape_xml_tokens, unescape};
