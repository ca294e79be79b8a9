//! Configuration file support
//!
//! A TOML file supplies defaults for the `process` command; options given
//! on the command line take precedence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Tokenization configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// XML input configuration
    #[serde(default)]
    pub xml: XmlConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Tokenization-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Language code or alias
    pub language: String,

    /// Split camelCase words
    pub split_camel_case: bool,

    /// Additional abbreviations, each ending in a dot
    pub custom_abbreviations: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            language: "de".to_string(),
            split_camel_case: false,
            custom_abbreviations: Vec::new(),
        }
    }
}

/// XML-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct XmlConfig {
    /// Replaces the default sentence-delimiting elements when non-empty
    pub eos_tags: Vec<String>,

    /// Elements removed together with their content
    pub prune_tags: Vec<String>,
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = one per CPU)
    pub parallel: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { parallel: 1 }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse a configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.message().to_string()).into())
    }
}
