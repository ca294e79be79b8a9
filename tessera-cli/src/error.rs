//! Error handling for the CLI application

use std::fmt;

/// CLI-level failures that are not errors of the core library
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    FileNotFound(String),
    /// Options that cannot be used together
    ConflictingOptions(String),
    /// Invalid configuration file or value
    ConfigError(String),
    /// Processing error from core
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::ConflictingOptions(msg) => write!(f, "Conflicting options: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<tessera_core::Error> for CliError {
    fn from(error: tessera_core::Error) -> Self {
        match error {
            tessera_core::Error::Configuration(msg) => CliError::ConfigError(msg),
            tessera_core::Error::UnsupportedLanguage { code } => {
                CliError::ConfigError(format!("unsupported language: {code}"))
            }
            other => CliError::ProcessingError(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("test.txt".to_string()).to_string(),
            "File not found: test.txt"
        );
        assert_eq!(
            CliError::ConflictingOptions("--prune needs --xml".to_string()).to_string(),
            "Conflicting options: --prune needs --xml"
        );
        assert_eq!(
            CliError::ConfigError("invalid format".to_string()).to_string(),
            "Configuration error: invalid format"
        );
    }

    #[test]
    fn test_from_core_error() {
        let error: CliError = tessera_core::Error::UnsupportedLanguage {
            code: "xx".to_string(),
        }
        .into();
        assert!(matches!(error, CliError::ConfigError(_)));
        assert!(error.to_string().contains("xx"));

        let error: CliError = tessera_core::Error::MalformedXml {
            position: 3,
            reason: "unclosed element".to_string(),
        }
        .into();
        assert!(matches!(error, CliError::ProcessingError(_)));
    }

    #[test]
    fn test_cli_result_type_alias() {
        let failure: CliResult<String> = Err(CliError::FileNotFound("x".into()).into());
        assert!(failure
            .unwrap_err()
            .to_string()
            .contains("File not found"));
    }
}
