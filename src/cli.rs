//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::fizzbuzz::MAX_ITERATIONS;
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// RevTally - sum revenue figures from ledgers, files or the command line
///
/// Totals are accumulated in the order given. With --round-down the
/// fractional part of every total is dropped (toward zero).
///
/// Examples:
///   revtally sum 32.7 43.8 17.2 21.9
///   revtally --round-down sum --input quarters.txt
///   revtally revenue --ledger sales --format json
///   revtally fizzbuzz --iterations 15
///   revtally --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Truncate totals toward zero
    ///
    /// Can also be set via REVTALLY_ROUND_DOWN (true/false, 1/0, yes/no)
    /// or `round_down` in .revtally.toml.
    #[arg(
        long,
        global = true,
        env = "REVTALLY_ROUND_DOWN",
        value_parser = BoolishValueParser::new()
    )]
    pub round_down: bool,

    /// Output format (text, json)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .revtally.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .revtally.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sum values given as arguments and/or read from a file
    Sum {
        /// Values to sum, in order
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        values: Vec<String>,

        /// File to read values from ('-' for stdin); read after VALUEs
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Report revenue per ledger and overall
    Revenue {
        /// Ledger to include (repeatable); defaults to every known ledger
        #[arg(short, long = "ledger", value_name = "NAME")]
        ledgers: Vec<String>,
    },

    /// List known ledgers
    Ledgers,

    /// Play fizzbuzz
    Fizzbuzz {
        /// Number of rounds (default: from config or 100, at most 1000000)
        #[arg(
            long,
            value_name = "COUNT",
            value_parser = clap::value_parser!(u32).range(0..=MAX_ITERATIONS as i64)
        )]
        iterations: Option<u32>,
    },
}

/// Output format for results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.command.is_none() {
            return Err("No command given. Run with --help for usage.".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(Command::Sum {
            input: Some(ref path),
            ..
        }) = self.command
        {
            if path.as_os_str() != "-" && !path.is_file() {
                return Err(format!("Input file does not exist: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
