//! Supported languages and their embedded configuration

pub mod config;
pub mod loader;
pub mod resources;

pub use config::{
    LanguageConfig, OrdinalStyle, PunctuationStyle, RuleConfig, SentenceConfig, SlashStyle,
};
pub use loader::{get_language_config, list_available_languages};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// German web and social media text
    #[default]
    GermanWeb,
    /// Formal English text
    EnglishFormal,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::GermanWeb => "de-web",
            Language::EnglishFormal => "en-formal",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::GermanWeb => "German (web and social media)",
            Language::EnglishFormal => "English (formal)",
        }
    }

    pub fn all() -> [Language; 2] {
        [Language::GermanWeb, Language::EnglishFormal]
    }

    pub fn config(&self) -> Result<&'static LanguageConfig> {
        get_language_config(self.code())
    }

    pub fn is_german(&self) -> bool {
        matches!(self, Language::GermanWeb)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config = get_language_config(s)?;
        Language::all()
            .into_iter()
            .find(|language| language.code() == config.metadata.code)
            .ok_or_else(|| Error::UnsupportedLanguage {
                code: s.to_string(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::GermanWeb.code(), "de-web");
        assert_eq!(Language::EnglishFormal.to_string(), "en-formal");
    }

    #[test]
    fn test_language_from_str_aliases() {
        assert_eq!("de".parse::<Language>().unwrap(), Language::GermanWeb);
        assert_eq!("de_CMC".parse::<Language>().unwrap(), Language::GermanWeb);
        assert_eq!("en_PTB".parse::<Language>().unwrap(), Language::EnglishFormal);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(Error::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_every_language_has_config() {
        for language in Language::all() {
            assert_eq!(language.config().unwrap().metadata.code, language.code());
        }
    }
}
