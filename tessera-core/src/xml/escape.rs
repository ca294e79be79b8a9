//! Escaping and entity decoding

use crate::error::{Error, Result};
use crate::token::Token;
use std::borrow::Cow;

/// Escape `&`, `<` and `>`
pub fn escape_text(text: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(text)
}

/// Escape an attribute value for a double-quoted attribute
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// Escape the text and original spelling of every non-markup token
pub fn escape_xml_tokens(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|mut token| {
            if token.markup {
                return token;
            }
            let escaped = match escape_text(&token.text) {
                Cow::Owned(escaped) => Some(escaped),
                Cow::Borrowed(_) => None,
            };
            if let Some(escaped) = escaped {
                token.text = escaped;
            }
            if let Some(original) = token.original_spelling.take() {
                token.original_spelling = Some(escape_text(&original).into_owned());
            }
            token
        })
        .collect()
}

/// Resolve entity and character references in character data
pub fn unescape(raw: &str) -> Result<Cow<'_, str>> {
    Ok(quick_xml::escape::unescape(raw)?)
}

/// Resolve references and keep the source span of every decoded char
///
/// Spans are byte offsets into `raw` shifted by `base`. All chars decoded
/// from one reference share the span of the whole reference.
pub fn decode_with_spans(raw: &str, base: usize) -> Result<Vec<(char, (usize, usize))>> {
    let mut decoded = Vec::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '&' {
            decoded.push((c, (base + i, base + i + c.len_utf8())));
            continue;
        }
        let end = raw[i..]
            .find(';')
            .map(|semicolon| i + semicolon + 1)
            .ok_or_else(|| Error::MalformedXml {
                position: base + i,
                reason: "unterminated reference".to_string(),
            })?;
        let resolved = unescape(&raw[i..end])?;
        decoded.extend(resolved.chars().map(|r| (r, (base + i, base + end))));
        // skip the rest of the reference
        for _ in raw[i + 1..end].chars() {
            chars.next();
        }
    }
    Ok(decoded)
}
