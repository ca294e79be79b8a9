//! Mapping tokens back to byte spans of the raw input
//!
//! Tokens are produced from text that went through entity resolution and
//! NFC normalization, and the rule pipeline drops invisible characters.
//! Alignment undoes these steps: every character the pipeline sees is
//! paired with the raw span it came from, and each token is then located
//! by a forward search over that character stream.

use crate::error::{Error, Result};
use crate::token::Token;
use crate::xml::{decode_with_spans, PieceKind, Source};
use std::ops::Range;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// A character of the normalized text with its raw byte span
type Aligned = (char, (usize, usize));

/// Align an NFC-normalized string with its source
///
/// Returns pairs of char ranges `(nfc, orig)` such that the NFC form of
/// each `orig` range equals the `nfc` range. Ranges are the smallest
/// units made of a base character and its combining marks.
pub fn align_nfc(nfc: &str, orig: &str) -> Result<Vec<(Range<usize>, Range<usize>)>> {
    let nfc: Vec<char> = nfc.chars().collect();
    let orig: Vec<char> = orig.chars().collect();
    let mut alignment = Vec::new();

    let (mut nfc_i, mut orig_i) = (0, 0);
    while nfc_i < nfc.len() || orig_i < orig.len() {
        let mut nfc_j = group_end(&nfc, nfc_i);
        let mut orig_j = group_end(&orig, orig_i);
        loop {
            let normalized: String = orig[orig_i..orig_j].iter().copied().nfc().collect();
            let normalized_len = normalized.chars().count();
            if normalized.chars().eq(nfc[nfc_i..nfc_j].iter().copied()) {
                break;
            }
            if (normalized_len > nfc_j - nfc_i || orig_j >= orig.len()) && nfc_j < nfc.len() {
                nfc_j = group_end(&nfc, nfc_j);
            } else if orig_j < orig.len() {
                orig_j = group_end(&orig, orig_j);
            } else {
                return Err(Error::Alignment {
                    token: nfc[nfc_i..].iter().collect(),
                    position: orig_i,
                });
            }
        }
        alignment.push((nfc_i..nfc_j, orig_i..orig_j));
        nfc_i = nfc_j;
        orig_i = orig_j;
    }
    Ok(alignment)
}

/// End of the base character at `start` and its combining marks
fn group_end(chars: &[char], start: usize) -> usize {
    if start >= chars.len() {
        return chars.len();
    }
    let mut end = start + 1;
    while end < chars.len() && canonical_combining_class(chars[end]) > 0 {
        end += 1;
    }
    end
}

/// Characters the pipeline removes without trace
pub fn is_skippable(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{00AD}'
                | '\u{061C}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'
                | '\u{2066}'..='\u{2069}'
                | '\u{FEFF}'
                | '\u{FE0F}'
        )
}

/// Decode and normalize one text token's pieces, keeping raw spans
fn normalized_chars(raw: &str, source: &Source) -> Result<Vec<Aligned>> {
    let mut decoded: Vec<Aligned> = Vec::new();
    for piece in source {
        let text = raw.get(piece.start..piece.end).ok_or_else(|| Error::Alignment {
            token: String::new(),
            position: piece.start,
        })?;
        match piece.kind {
            PieceKind::Escaped => decoded.extend(decode_with_spans(text, piece.start)?),
            PieceKind::Verbatim => decoded.extend(
                text.char_indices()
                    .map(|(i, c)| (c, (piece.start + i, piece.start + i + c.len_utf8()))),
            ),
        }
    }

    let orig: String = decoded.iter().map(|(c, _)| c).collect();
    let nfc: String = orig.nfc().collect();
    if nfc == orig {
        return Ok(decoded);
    }

    let nfc_chars: Vec<char> = nfc.chars().collect();
    let mut aligned = Vec::with_capacity(nfc_chars.len());
    for (nfc_range, orig_range) in align_nfc(&nfc, &orig)? {
        let span = (
            decoded[orig_range.start].1 .0,
            decoded[orig_range.end - 1].1 .1,
        );
        aligned.extend(nfc_chars[nfc_range].iter().map(|&c| (c, span)));
    }
    Ok(aligned)
}

/// Locate `spelling` in `stream` starting at `*cursor`
fn find_token(stream: &[Aligned], cursor: &mut usize, spelling: &str) -> Result<(usize, usize)> {
    let fail = |position: usize| Error::Alignment {
        token: spelling.to_string(),
        position: stream.get(position).map_or(0, |(_, span)| span.0),
    };
    let is_gap = |c: char| c.is_whitespace() || is_skippable(c);

    while *cursor < stream.len() && is_gap(stream[*cursor].0) {
        *cursor += 1;
    }
    let start = *cursor;

    let mut chars = spelling.trim().chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            if !stream.get(*cursor).is_some_and(|(s, _)| is_gap(*s)) {
                return Err(fail(*cursor));
            }
            while *cursor < stream.len() && is_gap(stream[*cursor].0) {
                *cursor += 1;
            }
            continue;
        }
        loop {
            let Some(&(s, _)) = stream.get(*cursor) else {
                return Err(fail(start));
            };
            *cursor += 1;
            if s == c {
                break;
            }
            if !is_skippable(s) {
                return Err(fail(*cursor - 1));
            }
        }
    }

    if *cursor == start {
        return Err(fail(start));
    }
    Ok((stream[start].1 .0, stream[*cursor - 1].1 .1))
}

/// Set `character_offset` on every non-markup token
///
/// `sources` holds the raw spans of the chunk's tokens before
/// tokenization; `tokens` is the tokenized chunk. Markup tokens keep the
/// offsets they were created with.
pub fn token_offsets(raw: &str, sources: &[Source], tokens: &mut [Token]) -> Result<()> {
    let mut stream: Vec<Aligned> = Vec::new();
    for source in sources.iter().filter(|s| !s.is_empty()) {
        stream.extend(normalized_chars(raw, source)?);
    }

    let mut cursor = 0;
    for token in tokens.iter_mut().filter(|t| !t.markup) {
        let spelling = token.original_spelling.as_deref().unwrap_or(&token.text);
        token.character_offset = Some(find_token(&stream, &mut cursor, spelling)?);
    }
    Ok(())
}
