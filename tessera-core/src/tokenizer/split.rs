//! Primitive edits the rule pipeline performs on a token list

use crate::error::Result;
use crate::token::{Token, TokenClass};
use crate::token_list::{NodeId, TokenList};

/// A span of a token's text that becomes a token of its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Boundary {
    pub start: usize,
    pub end: usize,
    /// Surface text replacing the matched text
    pub replacement: Option<String>,
}

impl Boundary {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            replacement: None,
        }
    }
}

/// How the pieces produced by a split are classified
#[derive(Debug, Clone, Copy)]
pub(crate) struct SplitMode {
    pub class: TokenClass,
    pub lock: bool,
    pub delete_whitespace: bool,
}

impl SplitMode {
    pub fn locked(class: TokenClass) -> Self {
        Self {
            class,
            lock: true,
            delete_whitespace: false,
        }
    }

    pub fn unlocked() -> Self {
        Self {
            class: TokenClass::Regular,
            lock: false,
            delete_whitespace: false,
        }
    }
}

/// Handles of all tokens rules may still split
pub(crate) fn candidates(list: &TokenList) -> Vec<NodeId> {
    list.ids()
        .into_iter()
        .filter(|&id| list.get(id).is_some_and(|t| !t.markup && !t.locked))
        .collect()
}

/// Replace `node` by the pieces delimited by `boundaries`
///
/// Boundaries are byte spans into the node's text in ascending order.
/// Text between boundaries becomes unlocked regular tokens; the spans
/// themselves take the class and lock state of `mode`.
pub(crate) fn split_on_boundaries(
    list: &mut TokenList,
    node: NodeId,
    boundaries: &[Boundary],
    mode: SplitMode,
) -> Result<()> {
    if boundaries.is_empty() {
        return Ok(());
    }
    let Some(token) = list.get(node) else {
        return Ok(());
    };
    let text = token.text.clone();
    let space_after = token.space_after;
    let first_in_sentence = token.first_in_sentence;
    let last_in_sentence = token.last_in_sentence;

    let n = boundaries.len();
    let mut prev_end = 0;
    for (i, boundary) in boundaries.iter().enumerate() {
        let left = &text[prev_end..boundary.start];
        let mut matched = text[boundary.start..boundary.end].to_string();
        let mut original_spelling = None;
        if let Some(replacement) = &boundary.replacement {
            if *replacement != matched {
                original_spelling = Some(matched);
                matched = replacement.clone();
            }
        }
        let right = &text[boundary.end..];
        prev_end = boundary.end;

        let left_space_after = left.ends_with(' ') || matched.starts_with(' ');
        let match_space_after = if matched.ends_with(' ') || right.starts_with(' ') {
            true
        } else {
            right.is_empty() && space_after
        };

        let left = left.trim();
        let mut matched = matched.trim().to_string();
        let right = right.trim();

        if mode.delete_whitespace {
            let without_spaces = matched.replace(' ', "");
            if without_spaces != matched {
                original_spelling.get_or_insert_with(|| matched.clone());
                matched = without_spaces;
            }
        }

        let mut first = i == 0 && first_in_sentence;
        let mut match_last = false;
        let mut right_last = false;
        if i == n - 1 {
            if right.is_empty() {
                match_last = last_in_sentence;
            } else {
                right_last = last_in_sentence;
            }
        }

        if !left.is_empty() {
            let piece = Token::new(left)
                .with_space_after(left_space_after)
                .with_sentence_flags(first, false);
            list.insert_left(piece, node)?;
            first = false;
        }

        let piece = Token {
            text: matched,
            locked: mode.lock,
            token_class: mode.class,
            space_after: match_space_after,
            original_spelling,
            first_in_sentence: first,
            last_in_sentence: match_last,
            ..Token::default()
        };
        list.insert_left(piece, node)?;

        if i == n - 1 && !right.is_empty() {
            let piece = Token::new(right)
                .with_space_after(space_after)
                .with_sentence_flags(false, right_last);
            list.insert_left(piece, node)?;
        }
    }
    list.remove(node)?;
    Ok(())
}

/// Delete unlocked tokens consisting only of whitespace
///
/// Sentence flags of a deleted token move to the nearest content
/// neighbour in the respective direction.
pub(crate) fn remove_empty_tokens(list: &mut TokenList) -> Result<()> {
    for id in candidates(list) {
        let Some(token) = list.get(id) else { continue };
        if !token.text.trim().is_empty() {
            continue;
        }
        let (first, last) = (token.first_in_sentence, token.last_in_sentence);
        if first {
            if let Some(next) = list.next_matching(id, |t| !t.markup, None::<fn(&Token) -> bool>) {
                if let Some(next) = list.get_mut(next) {
                    next.first_in_sentence = true;
                }
            }
        }
        if last {
            if let Some(prev) =
                list.previous_matching(id, |t| !t.markup, None::<fn(&Token) -> bool>)
            {
                if let Some(prev) = list.get_mut(prev) {
                    prev.last_in_sentence = true;
                }
            }
        }
        list.remove(id)?;
    }
    Ok(())
}

/// Split every remaining unlocked token on whitespace
pub(crate) fn split_on_whitespace(list: &mut TokenList) -> Result<()> {
    for id in candidates(list) {
        let Some(token) = list.get(id) else { continue };
        let pieces: Vec<String> = token.text.split_whitespace().map(str::to_string).collect();
        let (space_after, first, last) = (
            token.space_after,
            token.first_in_sentence,
            token.last_in_sentence,
        );
        let n = pieces.len();
        for (i, piece) in pieces.into_iter().enumerate() {
            let is_last = i + 1 == n;
            let piece = Token::new(piece)
                .with_space_after(if is_last { space_after } else { true })
                .with_sentence_flags(i == 0 && first, is_last && last);
            list.insert_left(piece, id)?;
        }
        list.remove(id)?;
    }
    Ok(())
}
