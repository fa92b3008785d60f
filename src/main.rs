//! RevTally - revenue tallying from the command line
//!
//! Sums ledgers of revenue figures, ad-hoc values or files of numbers,
//! optionally truncating totals toward zero.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad arguments, unreadable input, invalid config, etc.)

mod aggregate;
mod cli;
mod config;
mod fizzbuzz;
mod input;
mod models;
mod report;

use aggregate::Summary;
use anyhow::{bail, Context, Result};
use cli::{Args, Command};
use config::{Config, CONFIG_FILE_NAME};
use models::{all_ledgers, find_ledger, Ledger, RevenueReport};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Where the effective configuration came from.
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Defaults,
    DefaultFileInvalid(anyhow::Error),
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is read before logging starts so its verbosity applies
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(log_level(&args, &config));

    info!("RevTally v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_source(source);

    match run(args, &config) {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .revtally.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Pick the log level from flags, then from the config file.
fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging. Logs go to stderr so stdout carries only results.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::DefaultFileInvalid(e))),
    }
}

fn log_config_source(source: ConfigSource) {
    match source {
        ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
        ConfigSource::Defaults => debug!("No config file found, using defaults"),
        ConfigSource::DefaultFileInvalid(e) => {
            warn!("Failed to load config: {:#}", e);
        }
    }
}

/// Run the selected command and return what should be printed.
fn run(args: Args, config: &Config) -> Result<String> {
    let mode = config.rounding_mode();
    let format = config.general.format;

    let Some(command) = args.command else {
        bail!("No command given");
    };

    debug!("Rounding mode: {}", mode);

    match command {
        Command::Sum {
            values,
            input: input_path,
        } => {
            let data = collect_values(&values, input_path.as_deref())?;
            let summary = Summary::of(&data, mode);
            info!("Summed {} values", summary.count);
            report::render_sum(&summary, format)
        }
        Command::Revenue { ledgers } => {
            let selected = select_ledgers(&ledgers, &config.ledgers)?;
            let revenue = RevenueReport::build(&selected, mode);
            info!(
                "Revenue over {} ledgers: {}",
                revenue.ledgers.len(),
                revenue.grand_total
            );
            report::render_revenue(&revenue, format)
        }
        Command::Ledgers => report::render_ledgers(&all_ledgers(&config.ledgers), format),
        Command::Fizzbuzz { .. } => {
            let iterations = config.fizzbuzz.iterations;
            debug!("Playing {} rounds of fizzbuzz", iterations);
            report::render_fizzbuzz(&fizzbuzz::play(iterations), format)
        }
    }
}

/// Values from the command line first, then from the input file.
fn collect_values(values: &[String], input_path: Option<&Path>) -> Result<Vec<f64>> {
    let mut data = values
        .iter()
        .map(|v| input::parse_arg(v))
        .collect::<Result<Vec<f64>, _>>()
        .context("Invalid value on the command line")?;

    if let Some(path) = input_path {
        let from_file = input::read_values(path)
            .with_context(|| format!("Invalid input in {}", path.display()))?;
        data.extend(from_file);
    }

    Ok(data)
}

/// Resolve requested ledger names, or every known ledger when none are given.
fn select_ledgers(names: &[String], custom: &[Ledger]) -> Result<Vec<Ledger>> {
    if names.is_empty() {
        return Ok(all_ledgers(custom));
    }

    names
        .iter()
        .map(|name| find_ledger(name, custom).map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::models::Period;
    use clap::Parser;

    fn run_with(argv: &[&str], config: Config) -> Result<String> {
        let args = Args::parse_from(argv);
        let mut config = config;
        config.merge_with_args(&args);
        run(args, &config)
    }

    #[test]
    fn test_run_sum() {
        let output = run_with(
            &["revtally", "sum", "32.7", "43.8", "17.2", "21.9", "--round-down"],
            Config::default(),
        )
        .unwrap();
        assert!(output.starts_with("115\n"));
    }

    #[test]
    fn test_run_sum_without_values() {
        let output = run_with(&["revtally", "sum"], Config::default()).unwrap();
        assert!(output.starts_with("0\n"));
    }

    #[test]
    fn test_run_sum_rejects_bad_value() {
        assert!(run_with(&["revtally", "sum", "1.0", "ten"], Config::default()).is_err());
    }

    #[test]
    fn test_collect_values_appends_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("values.txt");
        std::fs::write(&path, "2.5\n# trailing\n").unwrap();

        let values = collect_values(&["1.5".to_string()], Some(&path)).unwrap();
        assert_eq!(values, vec![1.5, 2.5]);
    }

    #[test]
    fn test_run_revenue_uses_config_ledgers() {
        let mut config = Config::default();
        config.ledgers.push(Ledger::new("consulting", Period::Quarter, vec![10.5, 20.25]));

        let output = run_with(
            &["revtally", "--format", "json", "revenue", "-l", "consulting"],
            config,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["grand_total"], 30.75);
    }

    #[test]
    fn test_run_revenue_unknown_ledger() {
        let err = run_with(&["revtally", "revenue", "-l", "payroll"], Config::default())
            .unwrap_err();
        assert!(err.to_string().contains("payroll"));
    }

    #[test]
    fn test_select_all_ledgers_by_default() {
        let ledgers = select_ledgers(&[], &[]).unwrap();
        let names: Vec<&str> = ledgers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["licensing", "sales"]);
    }

    #[test]
    fn test_run_fizzbuzz_uses_config_iterations() {
        let mut config = Config::default();
        config.fizzbuzz.iterations = 3;

        let output = run_with(&["revtally", "fizzbuzz"], config).unwrap();
        assert_eq!(output, "1\n2\nFizz\n");
    }

    #[test]
    fn test_log_level_from_config() {
        let args = Args::parse_from(["revtally", "ledgers"]);
        let mut config = Config::default();
        assert_eq!(log_level(&args, &config), tracing::Level::WARN);

        config.general.verbose = true;
        assert_eq!(log_level(&args, &config), tracing::Level::DEBUG);

        let quiet = Args::parse_from(["revtally", "-q", "ledgers"]);
        assert_eq!(log_level(&quiet, &config), tracing::Level::ERROR);
    }

    #[test]
    fn test_config_format_applies() {
        let mut config = Config::default();
        config.general.format = OutputFormat::Json;

        let output = run_with(&["revtally", "ledgers"], config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["name"], "licensing");
    }
}
