//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Output format of the submitted team
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Run command arguments.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Script of session commands, one per line ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub script: PathBuf,

    /// Output format of the submitted team
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
