//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.revtally.toml` files.

use crate::aggregate::RoundingMode;
use crate::cli::{Args, Command, OutputFormat};
use crate::fizzbuzz::{DEFAULT_ITERATIONS, MAX_ITERATIONS};
use crate::models::Ledger;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".revtally.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Summation settings.
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Fizzbuzz settings.
    #[serde(default)]
    pub fizzbuzz: FizzbuzzConfig,

    /// User-defined ledgers, checked before the built-in ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ledgers: Vec<Ledger>,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Output format for results.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Summation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Truncate totals toward zero.
    #[serde(default)]
    pub round_down: bool,
}

impl AggregateConfig {
    /// The rounding mode these settings select.
    pub fn rounding_mode(&self) -> RoundingMode {
        RoundingMode::from_round_down(self.round_down)
    }
}

/// Fizzbuzz settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FizzbuzzConfig {
    /// Number of rounds to play.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

impl Default for FizzbuzzConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
        }
    }
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check values that parse as TOML but cannot be used.
    ///
    /// TOML accepts `nan` and `inf`, so ledger entries are checked here.
    pub fn validate(&self) -> Result<()> {
        for ledger in &self.ledgers {
            ledger.check_finite()?;
        }

        if self.fizzbuzz.iterations > MAX_ITERATIONS {
            bail!(
                "fizzbuzz.iterations must be at most {} (got {})",
                MAX_ITERATIONS,
                self.fizzbuzz.iterations
            );
        }

        Ok(())
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings. Switches
    /// only ever turn an option on.
    pub fn merge_with_args(&mut self, args: &Args) {
        if args.round_down {
            self.aggregate.round_down = true;
        }

        if let Some(format) = args.format {
            self.general.format = format;
        }

        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(Command::Fizzbuzz {
            iterations: Some(iterations),
        }) = &args.command
        {
            self.fizzbuzz.iterations = *iterations;
        }
    }

    /// The rounding mode in effect.
    pub fn rounding_mode(&self) -> RoundingMode {
        self.aggregate.rounding_mode()
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.aggregate.round_down);
        assert_eq!(config.rounding_mode(), RoundingMode::Exact);
        assert_eq!(config.fizzbuzz.iterations, 100);
        assert_eq!(config.general.format, OutputFormat::Text);
        assert!(config.ledgers.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true
format = "json"

[aggregate]
round_down = true

[fizzbuzz]
iterations = 30

[[ledgers]]
name = "consulting"
period = "quarter"
entries = [10.5, 20.25]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.general.format, OutputFormat::Json);
        assert_eq!(config.rounding_mode(), RoundingMode::TruncateTowardZero);
        assert_eq!(config.fizzbuzz.iterations, 30);
        assert_eq!(config.ledgers.len(), 1);
        assert_eq!(config.ledgers[0].period, Period::Quarter);
        assert_eq!(config.ledgers[0].entries, vec![10.5, 20.25]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[aggregate]\nround_down = true\n").unwrap();
        assert!(config.aggregate.round_down);
        assert_eq!(config.fizzbuzz.iterations, 100);
        assert!(!config.general.verbose);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[aggregate]"));
        assert!(toml_str.contains("[fizzbuzz]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(!parsed.aggregate.round_down);
    }

    #[test]
    fn test_merge_with_args() {
        let args = Args::parse_from([
            "revtally",
            "--round-down",
            "--format",
            "json",
            "fizzbuzz",
            "--iterations",
            "15",
        ]);

        let mut config = Config::default();
        config.merge_with_args(&args);

        assert_eq!(config.rounding_mode(), RoundingMode::TruncateTowardZero);
        assert_eq!(config.general.format, OutputFormat::Json);
        assert_eq!(config.fizzbuzz.iterations, 15);
    }

    #[test]
    fn test_merge_keeps_file_values_without_flags() {
        let args = Args::parse_from(["revtally", "revenue"]);

        let mut config = Config::default();
        config.aggregate.round_down = true;
        config.general.format = OutputFormat::Json;
        config.merge_with_args(&args);

        assert!(config.aggregate.round_down);
        assert_eq!(config.general.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[fizzbuzz]\niterations = 7\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.fizzbuzz.iterations, 7);
    }

    #[test]
    fn test_load_rejects_non_finite_ledger_entry() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[[ledgers]]\nname = \"x\"\nentries = [nan, 1.0]\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid config file"));
        assert!(message.contains("ledger 'x': entry 1"));
    }

    #[test]
    fn test_load_rejects_infinite_ledger_entry() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[[ledgers]]\nname = \"y\"\nentries = [1.0, -inf]\n").unwrap();

        let message = format!("{:#}", Config::load(&path).unwrap_err());
        assert!(message.contains("entry 2"));
    }

    #[test]
    fn test_load_rejects_excessive_iterations() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[fizzbuzz]\niterations = 4000000000\n").unwrap();

        let message = format!("{:#}", Config::load(&path).unwrap_err());
        assert!(message.contains("fizzbuzz.iterations"));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[aggregate\nround_down = ").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
