//! Language configuration types
//!
//! Each supported language ships as an embedded TOML file describing its
//! metadata, the word lists it draws on and the rule switches that differ
//! between German web text and formal English.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: MetadataConfig,
    pub resources: ResourceConfig,
    pub rules: RuleConfig,
    pub sentences: SentenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Names of the packaged word lists used by a language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub abbreviations: String,
    pub single_token_abbreviations: String,
    pub eos_abbreviations: String,
    pub units: String,
    pub camel_case_tokens: String,
    pub tokens_with_plus_or_ampersand: String,
    #[serde(default)]
    pub non_breaking_prefixes: Option<String>,
    #[serde(default)]
    pub non_breaking_suffixes: Option<String>,
    #[serde(default)]
    pub non_breaking_hyphenated_words: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrdinalStyle {
    /// `3.`
    German,
    /// `3rd`
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlashStyle {
    /// Split slashes except in gender forms like `Lehrer/innen`
    German,
    /// Keep `w/o`, `b/c` and similar words together
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunctuationStyle {
    /// One token per punctuation character
    German,
    /// Hyphens between words split, punctuation runs stay together
    English,
}

/// Switches for the tokenization rule pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Split `z.B.` into `z.` and `B.`
    pub split_multipart_abbreviations: bool,
    /// Split dates into day, month and year tokens
    pub split_dates: bool,
    /// Clitics, contractions, decades, non-breaking hyphen words
    #[serde(default)]
    pub english_contractions: bool,
    /// US phone numbers, ZIP codes, am/pm times
    #[serde(default)]
    pub us_numbers: bool,
    pub ordinal_style: OrdinalStyle,
    pub slash_style: SlashStyle,
    pub punctuation_style: PunctuationStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceConfig {
    /// `“` closes quotations (German `„…“`)
    pub closing_quote_includes_left_double: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_config_deserialize() {
        let toml_str = r#"
            [metadata]
            code = "xx"
            name = "Example"
            aliases = ["ex"]

            [resources]
            abbreviations = "a.txt"
            single_token_abbreviations = "b.txt"
            eos_abbreviations = "c.txt"
            units = "d.txt"
            camel_case_tokens = "e.txt"
            tokens_with_plus_or_ampersand = "f.txt"

            [rules]
            split_multipart_abbreviations = true
            split_dates = false
            ordinal_style = "german"
            slash_style = "english"
            punctuation_style = "german"

            [sentences]
            closing_quote_includes_left_double = false
        "#;

        let config: LanguageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.metadata.code, "xx");
        assert_eq!(config.metadata.aliases, vec!["ex"]);
        assert!(config.resources.non_breaking_prefixes.is_none());
        assert!(!config.rules.english_contractions);
        assert_eq!(config.rules.ordinal_style, OrdinalStyle::German);
        assert_eq!(config.rules.slash_style, SlashStyle::English);
    }
}
