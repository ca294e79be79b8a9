//! Tessera CLI library
//!
//! This library provides the command-line interface for the Tessera
//! tokenizer and sentence splitter.

use anyhow::Result;
use clap::Parser;

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};

use commands::Commands;

/// Tokenizer and sentence splitter for German and English web text
#[derive(Debug, Parser)]
#[command(name = "tessera", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the selected command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Process(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["tessera", "process"]).is_err());
    }
}
