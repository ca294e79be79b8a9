//! Punctuation-driven sentence boundary detection

use crate::error::{Error, Result};
use crate::language::{resources, Language, LanguageConfig};
use crate::token::{Token, TokenClass};
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashSet;

/// Indices of the non-markup tokens of a chunk
type ContentIndices = SmallVec<[usize; 64]>;

/// What the lookahead remembers about the last quote it passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Register {
    Opening,
    Closing,
}

/// Role of a punctuation token in the lookahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteRole {
    Opening,
    Closing,
}

/// Flags sentence boundaries on tokenized chunks
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    sentence_ending_punct: Regex,
    opening_punct: Regex,
    closing_punct: Regex,
    /// Quotes whose role depends on the surrounding whitespace
    ambiguous_quote: Regex,
    eos_abbreviations: HashSet<String>,
    /// `“` closes quotations and never opens them
    left_double_closes: bool,
}

impl SentenceSplitter {
    pub fn new(language: Language) -> Result<Self> {
        Self::from_config(language.config()?)
    }

    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        let left_double_closes = config.sentences.closing_quote_includes_left_double;
        let closing = if left_double_closes {
            r#"^(?:['"“\p{Pf}\p{Pe}])$"#
        } else {
            r#"^(?:['"\p{Pf}\p{Pe}])$"#
        };
        let eos_abbreviations = resources::word_list(&config.resources.eos_abbreviations)?
            .into_iter()
            .map(|abbreviation| abbreviation.to_lowercase())
            .collect();

        Ok(Self {
            sentence_ending_punct: compile(r"^(?:\.+|…+\.*|[!?]+)$")?,
            opening_punct: compile(r#"^(?:['"¿¡\p{Pi}\p{Ps}–—]|-{2,})$"#)?,
            closing_punct: compile(closing)?,
            ambiguous_quote: compile(r#"^['"\p{Pi}\p{Pf}]$"#)?,
            eos_abbreviations,
            left_double_closes,
        })
    }

    /// Set `first_in_sentence` and `last_in_sentence` on the content tokens
    /// of one chunk
    ///
    /// Flags already present (from eos tags or an earlier pass) are kept.
    pub fn flag_boundaries(&self, tokens: &mut [Token]) {
        let content: ContentIndices = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.markup)
            .map(|(i, _)| i)
            .collect();
        let (Some(&first), Some(&last)) = (content.first(), content.last()) else {
            return;
        };
        tokens[first].first_in_sentence = true;
        tokens[last].last_in_sentence = true;

        for (k, &i) in content.iter().enumerate() {
            if tokens[i].last_in_sentence || !self.ends_sentence(&tokens[i].text) {
                continue;
            }
            self.look_ahead(tokens, &content, k);
        }
    }

    /// Flag boundaries, then cut the chunk into sentences
    ///
    /// A sentence ends after its last token and the end tags directly
    /// following it. Tokens after the final boundary stay with the last
    /// sentence, so a chunk without content yields one markup-only
    /// sentence.
    pub fn split(&self, mut tokens: Vec<Token>) -> Vec<Vec<Token>> {
        if tokens.is_empty() {
            return Vec::new();
        }
        self.flag_boundaries(&mut tokens);

        let n = tokens.len();
        let mut boundaries: Vec<usize> = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            if !token.last_in_sentence {
                continue;
            }
            let trailing_end_tags = tokens[i + 1..]
                .iter()
                .take_while(|t| t.is_end_tag())
                .count();
            boundaries.push(i + 1 + trailing_end_tags);
        }
        match boundaries.last_mut() {
            Some(boundary) => *boundary = n,
            None => boundaries.push(n),
        }

        let mut sentences = Vec::with_capacity(boundaries.len());
        let mut rest = tokens;
        for boundary in boundaries.iter().rev() {
            let tail = rest.split_off((*boundary).min(rest.len()));
            if !tail.is_empty() {
                sentences.push(tail);
            }
        }
        if !rest.is_empty() {
            sentences.push(rest);
        }
        sentences.reverse();
        sentences
    }

    fn ends_sentence(&self, text: &str) -> bool {
        self.sentence_ending_punct.is_match(text)
            || self.eos_abbreviations.contains(&text.to_lowercase())
    }

    /// Decide whether the candidate at `content[k]` ends a sentence
    fn look_ahead(&self, tokens: &mut [Token], content: &[usize], k: usize) {
        let mut last = content[k];
        let mut first: Option<usize> = None;
        let mut register: Option<Register> = None;

        for (offset, &j) in content[k + 1..].iter().enumerate() {
            let position = k + 1 + offset;
            let first_index = *first.get_or_insert(j);
            let next = &tokens[j];

            if starts_sentence(next) {
                tokens[last].last_in_sentence = true;
                tokens[first_index].first_in_sentence = true;
                return;
            }

            let extends = match self.quote_role(tokens, content, position) {
                Some(QuoteRole::Opening) => {
                    register = Some(Register::Opening);
                    continue;
                }
                Some(QuoteRole::Closing) => register != Some(Register::Opening),
                None => {
                    tokens[j].token_class == TokenClass::Emoticon
                        && register != Some(Register::Opening)
                }
            };
            if !extends {
                return;
            }
            last = j;
            first = None;
            register = Some(Register::Closing);
        }
    }

    /// Classify the token at `content[position]` as opening or closing
    /// punctuation
    ///
    /// Straight and initial/final quotes are resolved by the whitespace
    /// around them: attached to the preceding token and followed by space or
    /// the end of the chunk is closing, the reverse is opening. Guillemets
    /// point either way depending on the language, so their Unicode category
    /// only decides when the spacing does not.
    fn quote_role(&self, tokens: &[Token], content: &[usize], position: usize) -> Option<QuoteRole> {
        let token = &tokens[content[position]];
        let text = token.text.as_str();
        let is_left_double = text == "“";

        if self.ambiguous_quote.is_match(text) {
            let space_before = position == 0 || tokens[content[position - 1]].space_after;
            let space_after = token.space_after || position + 1 == content.len();
            if !space_before && space_after {
                return Some(QuoteRole::Closing);
            }
            if space_before && !token.space_after {
                return Some(QuoteRole::Opening);
            }
        }

        if self.opening_punct.is_match(text) && !(is_left_double && self.left_double_closes) {
            Some(QuoteRole::Opening)
        } else if self.closing_punct.is_match(text) {
            Some(QuoteRole::Closing)
        } else {
            None
        }
    }
}

/// The token after a boundary candidate confirms the boundary
fn starts_sentence(token: &Token) -> bool {
    matches!(token.token_class, TokenClass::Hashtag | TokenClass::Mention)
        || token
            .text
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c.is_numeric())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Configuration(format!("pattern error: {e}")))
}
