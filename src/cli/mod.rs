//! CLI module - Command-line interface for Jobwatch
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};

/// Jobwatch - company and job posting tracker
#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Load and validate the configuration, then print it with secrets masked
    CheckConfig,
}

impl Cli {
    #[must_use]
    pub fn command_or_default(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}
