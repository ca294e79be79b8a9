//! Rule pipeline
//!
//! Tokenization is a fixed sequence of pattern-driven splits over a
//! [`TokenList`]. Each rule visits every token that is neither markup nor
//! locked, carves the matches out as tokens of their own and locks them,
//! so later rules never see already classified text. The order of the
//! rules is significant: URLs must be recognized before punctuation is
//! split off, numbers before dots, and so on.

mod patterns;
pub(crate) mod split;

use crate::error::Result;
use crate::language::{Language, LanguageConfig};
use crate::token::{Token, TokenClass};
use crate::token_list::TokenList;
use fancy_regex::Regex;
use log::debug;
use patterns::{Patterns, Rule, SetRule};
use split::{candidates, split_on_boundaries, Boundary, SplitMode};
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// The ordered tokenization rules of one language
///
/// Cloning is cheap; the compiled patterns are shared.
#[derive(Clone)]
pub struct RulePipeline {
    patterns: Arc<Patterns>,
    split_camel_case: bool,
}

impl RulePipeline {
    pub fn new(
        language: Language,
        split_camel_case: bool,
        custom_abbreviations: &[String],
    ) -> Result<Self> {
        Self::from_config(language.config()?, split_camel_case, custom_abbreviations)
    }

    pub fn from_config(
        config: &LanguageConfig,
        split_camel_case: bool,
        custom_abbreviations: &[String],
    ) -> Result<Self> {
        debug!(
            "Compiling tokenization rules for {} ({} custom abbreviations)",
            config.metadata.code,
            custom_abbreviations.len()
        );
        Ok(Self {
            patterns: Arc::new(Patterns::new(config, custom_abbreviations)?),
            split_camel_case,
        })
    }

    /// Tokenize a single paragraph of plain text
    pub fn tokenize_paragraph(&self, paragraph: &str) -> Result<Vec<Token>> {
        let mut list = TokenList::new();
        list.append(Token::new(paragraph).with_sentence_flags(true, true));
        self.tokenize(&mut list)?;
        Ok(list.into_vec())
    }

    /// Run every rule over `list` in order
    pub fn tokenize(&self, list: &mut TokenList) -> Result<()> {
        let p = &*self.patterns;

        self.normalize(list);

        // tokens that may contain whitespace
        self.split_all(list, &p.xml_declaration)?;
        self.split_all(list, &p.tag)?;

        // emoji sequences may contain zero-width joiners
        self.split_all(list, &p.textfaces_space)?;
        self.split_all(list, &p.unicode_flags)?;
        self.split_all(list, &p.textfaces_emoji)?;
        self.split_all_emojis(list)?;

        self.remove_junk(list);
        split::remove_empty_tokens(list)?;

        self.split_all(list, &p.space_emoticon)?;
        self.split_all(list, &p.email)?;
        for rule in &p.urls {
            self.split_all(list, rule)?;
        }
        self.split_all(list, &p.entity)?;
        for rule in &p.emoticons {
            self.split_all(list, rule)?;
        }

        self.split_all(list, &p.mention)?;
        self.split_all_in_match(list, &p.hashtag_sequence, &p.single_hashtag)?;
        self.split_all(list, &p.action_word)?;
        self.split_all(list, &p.underline)?;
        self.split_all(list, &p.emoji_placeholder)?;

        self.split_all(list, &p.plus_ampersand)?;
        self.split_all_set(list, &p.simple_plus_ampersand)?;

        if self.split_camel_case {
            self.split_all(list, &p.camel_case_token)?;
            self.split_all_set(list, &p.simple_camel_case)?;
            self.split_all(list, &p.in_and_innen)?;
            self.split_all_left(list, &p.camel_case)?;
        }

        self.split_all(list, &p.gender_marker)?;

        if let Some(en) = &p.english {
            self.split_all(list, &en.decades)?;
            for rule in &en.clitics {
                self.split_all(list, rule)?;
            }
            self.split_all_left(list, &en.trailing_apostrophe)?;
            for rule in &en.contractions {
                self.split_all(list, rule)?;
            }
            self.split_all(list, &en.number_abbreviation)?;
            self.split_all(list, &en.degree)?;
            for rule in &en.non_breaking {
                self.split_all(list, rule)?;
            }
        }

        self.split_all(list, &p.measurement)?;
        self.split_abbreviations(list)?;
        self.split_all(list, &p.artikel)?;

        self.split_all(list, &p.isbn)?;
        for rule in &p.dates {
            self.split_all(list, rule)?;
        }
        if let Some(en) = &p.english {
            self.split_all(list, &en.time)?;
        }
        self.split_all(list, &p.time)?;
        if let Some(en) = &p.english {
            for rule in &en.numbers {
                self.split_all(list, rule)?;
            }
        }
        for rule in p.ordinals.iter().chain(&p.numbers) {
            self.split_all(list, rule)?;
        }

        self.split_all(list, &p.question_exclamation)?;
        self.split_all(list, &p.arrow)?;
        self.split_all(list, &p.parens)?;
        if let Some(en) = &p.english {
            self.split_all(list, &en.slash_words)?;
        }
        if let Some(rule) = &p.german_slash {
            self.split_all(list, rule)?;
        }
        self.split_all(list, &p.letter_apostrophe_word)?;
        for rule in &p.quotes {
            self.split_all(list, rule)?;
        }
        self.split_all(list, &p.letter_sharp)?;
        if let Some(en) = &p.english {
            self.split_all(list, &en.hyphen)?;
            self.split_all(list, &en.quotation_marks)?;
        }
        self.split_all(list, &p.punctuation)?;
        self.split_all(list, &p.ellipsis)?;
        for rule in &p.dots {
            self.split_all(list, rule)?;
        }

        split::split_on_whitespace(list)
    }

    /// NFC, whitespace collapsing, control characters, stranded variation selectors
    fn normalize(&self, list: &mut TokenList) {
        let p = &*self.patterns;
        for id in list.ids() {
            let Some(token) = list.get_mut(id) else { continue };
            token.text = token.text.nfc().collect();
            if token.markup || token.locked {
                continue;
            }
            let cleaned = {
                let text = p.spaces.replace_all(&token.text, " ");
                let text = p.controls.replace_all(&text, "");
                let text = text.replace(" \u{FE0F}", "");
                p.spaces.replace_all(&text, " ").into_owned()
            };
            token.text = cleaned;
        }
    }

    /// Soft hyphens, zero-width characters, bidi controls and the BOM
    fn remove_junk(&self, list: &mut TokenList) {
        let p = &*self.patterns;
        for id in candidates(list) {
            let Some(token) = list.get_mut(id) else { continue };
            let cleaned = {
                let text = p.junk.replace_all(&token.text, "");
                p.spaces.replace_all(&text, " ").into_owned()
            };
            token.text = cleaned;
        }
    }

    fn split_all(&self, list: &mut TokenList, rule: &Rule) -> Result<()> {
        for id in candidates(list) {
            let boundaries = match list.get(id) {
                Some(token) => rule.boundaries(&token.text)?,
                None => continue,
            };
            split_on_boundaries(list, id, &boundaries, rule.mode())?;
        }
        Ok(())
    }

    fn split_all_set(&self, list: &mut TokenList, rule: &SetRule) -> Result<()> {
        for id in candidates(list) {
            let boundaries = match list.get(id) {
                Some(token) => rule.boundaries(&token.text)?,
                None => continue,
            };
            split_on_boundaries(list, id, &boundaries, SplitMode::locked(TokenClass::Regular))?;
        }
        Ok(())
    }

    /// Split to the left of every match, leaving the pieces unlocked
    fn split_all_left(&self, list: &mut TokenList, regex: &Regex) -> Result<()> {
        for id in candidates(list) {
            let Some(token) = list.get(id) else { continue };
            let mut boundaries = Vec::new();
            let mut prev_end = 0;
            for m in regex.find_iter(&token.text) {
                let m = m?;
                boundaries.push(Boundary::new(prev_end, m.start()));
                prev_end = m.start();
            }
            split_on_boundaries(list, id, &boundaries, SplitMode::unlocked())?;
        }
        Ok(())
    }

    /// Turn every match of `inner` within a match of `outer` into a token
    fn split_all_in_match(&self, list: &mut TokenList, outer: &Regex, inner: &Rule) -> Result<()> {
        for id in candidates(list) {
            let Some(token) = list.get(id) else { continue };
            let mut boundaries = Vec::new();
            for m in outer.find_iter(&token.text) {
                let m = m?;
                for inner_match in inner.regex().find_iter(m.as_str()) {
                    let inner_match = inner_match?;
                    boundaries.push(Boundary::new(
                        m.start() + inner_match.start(),
                        m.start() + inner_match.end(),
                    ));
                }
            }
            split_on_boundaries(list, id, &boundaries, inner.mode())?;
        }
        Ok(())
    }

    /// Extended grapheme clusters with an emoji property become tokens
    fn split_all_emojis(&self, list: &mut TokenList) -> Result<()> {
        let p = &*self.patterns;
        for id in candidates(list) {
            let Some(token) = list.get(id) else { continue };
            let boundaries: Vec<Boundary> = token
                .text
                .grapheme_indices(true)
                .filter(|(_, cluster)| {
                    if cluster.chars().nth(1).is_some() {
                        p.emoji_in_cluster.is_match(cluster)
                    } else {
                        p.emoji_char.is_match(cluster)
                    }
                })
                .map(|(start, cluster)| Boundary::new(start, start + cluster.len()))
                .collect();
            split_on_boundaries(list, id, &boundaries, SplitMode::locked(TokenClass::Emoticon))?;
        }
        Ok(())
    }

    fn split_abbreviations(&self, list: &mut TokenList) -> Result<()> {
        let p = &*self.patterns;
        for rule in &p.abbreviations {
            self.split_all(list, rule)?;
        }
        for id in candidates(list) {
            let Some(token) = list.get(id) else { continue };
            let boundaries = self.abbreviation_boundaries(&token.text)?;
            split_on_boundaries(list, id, &boundaries, SplitMode::locked(TokenClass::Abbreviation))?;
        }
        Ok(())
    }

    /// Known abbreviations; multi-dot compounds become one token per part
    /// unless the language keeps them whole
    fn abbreviation_boundaries(&self, text: &str) -> Result<Vec<Boundary>> {
        let p = &*self.patterns;
        let mut boundaries = Vec::new();
        for m in p.abbreviation.find_iter(text) {
            let m = m?;
            let instance = m.as_str();
            if p.split_multipart_abbreviations && p.multipart_abbreviation.is_match(instance) {
                let mut part_start = m.start();
                for (offset, c) in instance.char_indices() {
                    if c == '.' {
                        let part_end = m.start() + offset + 1;
                        boundaries.push(Boundary::new(part_start, part_end));
                        part_start = part_end;
                    }
                }
            } else {
                boundaries.push(Boundary::new(m.start(), m.end()));
            }
        }
        Ok(boundaries)
    }
}

impl std::fmt::Debug for RulePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulePipeline")
            .field("split_camel_case", &self.split_camel_case)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    fn german() -> &'static RulePipeline {
        static GERMAN: OnceLock<RulePipeline> = OnceLock::new();
        GERMAN.get_or_init(|| RulePipeline::new(Language::GermanWeb, false, &[]).unwrap())
    }

    fn english() -> &'static RulePipeline {
        static ENGLISH: OnceLock<RulePipeline> = OnceLock::new();
        ENGLISH.get_or_init(|| RulePipeline::new(Language::EnglishFormal, false, &[]).unwrap())
    }

    fn texts(pipeline: &RulePipeline, text: &str) -> Vec<String> {
        pipeline
            .tokenize_paragraph(text)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_ellipsis_stays_whole() {
        assert_eq!(
            texts(&german(), "Das hab ich mich auch schon gefragt..."),
            vec!["Das", "hab", "ich", "mich", "auch", "schon", "gefragt", "..."]
        );
    }

    #[test]
    fn test_percent_is_split() {
        assert_eq!(texts(&german(), "10%"), vec!["10", "%"]);
    }

    #[test]
    fn test_emoticons() {
        assert_eq!(texts(&german(), "Heyi:)"), vec!["Heyi", ":)"]);
        assert_eq!(texts(&german(), "Film?;-)"), vec!["Film", "?", ";-)"]);
    }

    #[test]
    fn test_space_emoticon_keeps_original() {
        let tokens = german().tokenize_paragraph("Na : )").unwrap();
        assert_eq!(tokens[1].text, ":)");
        assert_eq!(tokens[1].original_spelling.as_deref(), Some(": )"));
        assert_eq!(tokens[1].token_class, TokenClass::Emoticon);
    }

    #[test]
    fn test_token_classes() {
        let tokens = german()
            .tokenize_paragraph("Schau auf www.example.com vorbei, @anna #cool")
            .unwrap();
        let classes: Vec<_> = tokens.iter().map(|t| (t.text.as_str(), t.token_class)).collect();
        assert!(classes.contains(&("www.example.com", TokenClass::Url)));
        assert!(classes.contains(&("@anna", TokenClass::Mention)));
        assert!(classes.contains(&("#cool", TokenClass::Hashtag)));
        assert!(classes.contains(&(",", TokenClass::Symbol)));
    }

    #[test]
    fn test_german_multipart_abbreviation() {
        assert_eq!(texts(&german(), "z.B. hier"), vec!["z.", "B.", "hier"]);
        assert_eq!(texts(&english(), "e.g. here"), vec!["e.g.", "here"]);
    }

    #[test]
    fn test_german_date_split() {
        assert_eq!(texts(&german(), "am 1.3.2024"), vec!["am", "1.", "3.", "2024"]);
    }

    #[test]
    fn test_english_contractions() {
        assert_eq!(texts(&english(), "I don't know"), vec!["I", "do", "n't", "know"]);
        assert_eq!(texts(&english(), "gonna go"), vec!["gon", "na", "go"]);
    }

    #[test]
    fn test_camel_case_split_respects_exceptions() {
        let pipeline = RulePipeline::new(Language::GermanWeb, true, &[]).unwrap();
        assert_eq!(texts(&pipeline, "neuesHaus"), vec!["neues", "Haus"]);
        assert_eq!(texts(&pipeline, "mein iPhone"), vec!["mein", "iPhone"]);
    }

    #[test]
    fn test_emoji_grapheme_clusters() {
        let tokens = texts(&german(), "Toll👍🏽👨‍👩‍👧!");
        assert_eq!(tokens, vec!["Toll", "👍🏽", "👨‍👩‍👧", "!"]);
    }

    #[test]
    fn test_junk_characters_removed() {
        assert_eq!(texts(&german(), "Test\u{00AD}fall"), vec!["Testfall"]);
        assert_eq!(texts(&german(), "foo \u{200B} bar"), vec!["foo", "bar"]);
    }

    #[test]
    fn test_sentence_flags_survive() {
        let tokens = german().tokenize_paragraph("Hallo Welt!").unwrap();
        assert!(tokens[0].first_in_sentence);
        assert!(tokens.last().unwrap().last_in_sentence);
        assert!(tokens.iter().filter(|t| t.first_in_sentence).count() == 1);
    }
}
