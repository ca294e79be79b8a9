//! Configuration API for tokenization

use crate::error::{Error, Result};
use crate::language::Language;
use std::str::FromStr;

/// Processing configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) language: Language,
    pub(crate) split_camel_case: bool,
    pub(crate) split_sentences: bool,
    /// Name of the element wrapped around each sentence
    pub(crate) xml_sentences: Option<String>,
    pub(crate) character_offsets: bool,
    pub(crate) custom_abbreviations: Vec<String>,
    /// Worker threads; 1 processes sequentially
    pub(crate) parallel: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            split_camel_case: false,
            split_sentences: true,
            xml_sentences: None,
            character_offsets: false,
            custom_abbreviations: Vec::new(),
            parallel: 1,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn split_camel_case(&self) -> bool {
        self.split_camel_case
    }

    pub fn split_sentences(&self) -> bool {
        self.split_sentences
    }

    pub fn xml_sentences(&self) -> Option<&str> {
        self.xml_sentences.as_deref()
    }

    pub fn character_offsets(&self) -> bool {
        self.character_offsets
    }

    pub fn custom_abbreviations(&self) -> &[String] {
        &self.custom_abbreviations
    }

    pub fn parallel(&self) -> usize {
        self.parallel
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.parallel == 0 {
            return Err(Error::Configuration(
                "parallel must be greater than 0".into(),
            ));
        }

        if let Some(tag) = &self.xml_sentences {
            let valid = tag
                .chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
                && tag
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
            if !valid {
                return Err(Error::Configuration(format!(
                    "invalid sentence tag name: {tag:?}"
                )));
            }
        }

        if let Some(empty) = self.custom_abbreviations.iter().find(|a| a.trim().is_empty()) {
            return Err(Error::Configuration(format!(
                "custom abbreviations must not be blank: {empty:?}"
            )));
        }

        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    language: Option<String>,
    split_camel_case: Option<bool>,
    split_sentences: Option<bool>,
    xml_sentences: Option<String>,
    character_offsets: Option<bool>,
    custom_abbreviations: Vec<String>,
    parallel: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language by code or alias
    pub fn language(mut self, code: impl Into<String>) -> Result<Self> {
        self.language = Some(code.into());
        Ok(self)
    }

    /// Split words written in camelCase
    pub fn split_camel_case(mut self, enabled: bool) -> Self {
        self.split_camel_case = Some(enabled);
        self
    }

    /// Perform sentence splitting in addition to tokenization
    pub fn split_sentences(mut self, enabled: bool) -> Self {
        self.split_sentences = Some(enabled);
        self
    }

    /// Delimit sentences by XML elements of this name
    pub fn xml_sentences(mut self, tag: impl Into<String>) -> Self {
        self.xml_sentences = Some(tag.into());
        self
    }

    /// Compute byte offsets into the input for every token
    pub fn character_offsets(mut self, enabled: bool) -> Self {
        self.character_offsets = Some(enabled);
        self
    }

    /// Additional abbreviations, kept as single tokens
    pub fn custom_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_abbreviations
            .extend(abbreviations.into_iter().map(Into::into));
        self
    }

    /// Set the number of worker threads
    pub fn parallel(mut self, workers: usize) -> Self {
        self.parallel = Some(workers);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(code) = self.language {
            config.language = Language::from_str(&code)?;
        }
        if let Some(enabled) = self.split_camel_case {
            config.split_camel_case = enabled;
        }
        if let Some(enabled) = self.split_sentences {
            config.split_sentences = enabled;
        }
        if let Some(enabled) = self.character_offsets {
            config.character_offsets = enabled;
        }
        if let Some(workers) = self.parallel {
            config.parallel = workers;
        }
        config.xml_sentences = self.xml_sentences;
        config.custom_abbreviations = self.custom_abbreviations;

        config.validate()?;
        Ok(config)
    }
}
