use super::config::LanguageConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

type ConfigTable = std::result::Result<HashMap<String, LanguageConfig>, String>;

static LANGUAGE_CONFIGS: OnceLock<ConfigTable> = OnceLock::new();

macro_rules! embed_language_config {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded_configs() -> ConfigTable {
    let mut configs = HashMap::new();

    let embedded_configs = [
        embed_language_config!("de-web", "../../configs/languages/german.toml"),
        embed_language_config!("en-formal", "../../configs/languages/english.toml"),
    ];

    for (code, toml_content) in embedded_configs {
        let config: LanguageConfig = toml::from_str(toml_content)
            .map_err(|e| format!("Failed to parse {code} config: {e}"))?;

        if config.metadata.code != code {
            return Err(format!(
                "Config code mismatch: expected {}, got {}",
                code, config.metadata.code
            ));
        }

        configs.insert(code.to_string(), config);
    }

    Ok(configs)
}

fn configs() -> Result<&'static HashMap<String, LanguageConfig>> {
    LANGUAGE_CONFIGS
        .get_or_init(load_embedded_configs)
        .as_ref()
        .map_err(|e| Error::Configuration(e.clone()))
}

/// Look up a language by its code or one of its aliases
pub fn get_language_config(code: &str) -> Result<&'static LanguageConfig> {
    let configs = configs()?;

    if let Some(config) = configs.get(code) {
        return Ok(config);
    }

    configs
        .values()
        .find(|config| config.metadata.aliases.iter().any(|alias| alias == code))
        .ok_or_else(|| Error::UnsupportedLanguage {
            code: code.to_string(),
        })
}

pub fn list_available_languages() -> Vec<&'static str> {
    let mut languages: Vec<&'static str> = configs()
        .map(|configs| configs.keys().map(|s| s.as_str()).collect())
        .unwrap_or_default();
    languages.sort_unstable();
    languages
}
