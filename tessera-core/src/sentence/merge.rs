use crate::token::Token;

/// Attach sentences that consist only of markup to a neighbour
///
/// Markup-only sentences are held back and prepended to the next sentence
/// with content. Markup after the last such sentence is appended to it. If
/// the whole input has no content, the held markup is returned as a single
/// sentence.
pub fn merge_empty_sentences<I>(sentences: I) -> Vec<Vec<Token>>
where
    I: IntoIterator<Item = Vec<Token>>,
{
    let mut merged: Vec<Vec<Token>> = Vec::new();
    let mut held: Option<Vec<Token>> = None;

    for sentence in sentences {
        if sentence.is_empty() {
            continue;
        }
        if sentence.iter().all(|token| token.markup) {
            held.get_or_insert_with(Vec::new).extend(sentence);
            continue;
        }
        match held.take() {
            Some(mut markup) => {
                markup.extend(sentence);
                merged.push(markup);
            }
            None => merged.push(sentence),
        }
    }

    if let Some(markup) = held {
        match merged.last_mut() {
            Some(last) => last.extend(markup),
            None => merged.push(markup),
        }
    }
    merged
}
