//! CLI command implementations

use clap::Subcommand;
use tessera_core::Language;

pub mod process;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tokenize a text or XML file and optionally split it into sentences
    Process(Box<process::ProcessArgs>),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List supported languages
    Languages,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested listing to stdout
    pub fn execute(&self) {
        match self {
            ListCommands::Languages => {
                println!("Supported languages:");
                for language in Language::all() {
                    println!("  {:<10} - {}", language.code(), language.name());
                }
                println!();
                println!("Aliases: de, de_CMC (de-web); en, en_PTB (en-formal)");
            }
            ListCommands::Formats => {
                println!("Available output formats:");
                println!("  text - One token per line with optional tab-separated columns");
                println!("  json - JSON array of sentences, each an array of tokens");
            }
        }
    }
}
