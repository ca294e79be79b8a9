//! Packaged word lists
//!
//! Plain text, one entry per line. Lines starting with `#` and blank lines
//! are ignored.

use crate::error::{Error, Result};

macro_rules! embed_resource {
    ($name:expr) => {
        ($name, include_str!(concat!("../../resources/", $name)))
    };
}

const RESOURCES: &[(&str, &str)] = &[
    embed_resource!("abbreviations_de.txt"),
    embed_resource!("abbreviations_en.txt"),
    embed_resource!("single_token_abbreviations_de.txt"),
    embed_resource!("single_token_abbreviations_en.txt"),
    embed_resource!("eos_abbreviations.txt"),
    embed_resource!("units.txt"),
    embed_resource!("camel_case_tokens.txt"),
    embed_resource!("tokens_with_plus_or_ampersand.txt"),
    embed_resource!("non-breaking_prefixes_en.txt"),
    embed_resource!("non-breaking_suffixes_en.txt"),
    embed_resource!("non-breaking_hyphenated_words_en.txt"),
    embed_resource!("emoticons.txt"),
    embed_resource!("textfaces_space.txt"),
    embed_resource!("textfaces_emoji.txt"),
];

/// Parse a word list into unique entries
pub fn parse_word_list(content: &str) -> Vec<String> {
    let mut entries: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    entries.sort();
    entries.dedup();
    entries
}

/// Entries of a packaged word list, longest first
///
/// Alternations built from the result prefer the longest entry at a given
/// position.
pub fn word_list(name: &str) -> Result<Vec<String>> {
    let content = RESOURCES
        .iter()
        .find(|(resource, _)| *resource == name)
        .map(|(_, content)| *content)
        .ok_or_else(|| Error::Configuration(format!("unknown resource file: {name}")))?;

    let mut entries = parse_word_list(content);
    entries.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    Ok(entries)
}

pub fn available_resources() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|(name, _)| *name)
}
