//! Yard-Scout main entry point
//!
//! This is the command-line interface for the Yard-Scout inventory watcher.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use yard_scout::config::{load_config_with_hash, Config};
use yard_scout::output::{report_outcome, FileReporter};
use yard_scout::QueryOutcome;

/// Every source produced a hit and none failed
const EXIT_COMPLETE: u8 = 0;

/// A source failed or came back without a hit
const EXIT_DEGRADED: u8 = 1;

/// The run could not start
const EXIT_SETUP_FAILED: u8 = 2;

/// Yard-Scout: a salvage yard inventory watcher
///
/// Yard-Scout queries each configured yard listing, extracts the model years
/// it lists, and reports the sources holding a vehicle inside the target
/// year window. The exit status is 0 only when every source had a hit.
#[derive(Parser, Debug)]
#[command(name = "yard-scout")]
#[command(version)]
#[command(about = "A salvage yard inventory watcher", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be queried without querying
    #[arg(long)]
    dry_run: bool,

    /// Write reports into this directory instead of the configured one
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write reports to files only, without echoing them to stdout
    #[arg(long)]
    no_echo: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    ExitCode::from(run_status(run(cli).await))
}

/// Collapses a run result into an exit status, logging setup failures
fn run_status(result: anyhow::Result<u8>) -> u8 {
    result.unwrap_or_else(|e| {
        tracing::error!("{:#}", e);
        EXIT_SETUP_FAILED
    })
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("yard_scout=info,warn"),
            1 => EnvFilter::new("yard_scout=debug,info"),
            2 => EnvFilter::new("yard_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.to_string_lossy().into_owned();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(EXIT_COMPLETE);
    }

    let echo = !cli.no_echo && !cli.quiet;
    handle_query(&config, &config_hash, echo).await
}

/// Handles the --dry-run mode: shows what would be queried
fn handle_dry_run(config: &Config) {
    println!("=== Yard-Scout Dry Run ===\n");

    println!("Query:");
    println!("  Timeout: {:?}", config.timeout());
    println!("  User agent: {}", config.query.user_agent);

    println!("\nTarget window: {}", config.window);
    println!(
        "Marker: <{} {}*=\"{}\">",
        config.marker.tag, config.marker.attribute, config.marker.contains
    );

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Errors: {}", config.output.error_file);
    println!("  Log: {}", config.output.log_file);

    println!("\nSources ({}):", config.sources.len());
    for entry in &config.sources {
        println!("  - {} [{:?}]", entry.label, entry.extractor);
        println!("    {}", entry.url);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main query run
async fn handle_query(config: &Config, config_hash: &str, echo: bool) -> anyhow::Result<u8> {
    let mut reporter = FileReporter::create(&config.output, echo).with_context(|| {
        format!(
            "Failed to create reports in {}",
            config.output.directory
        )
    })?;

    let started_at = Utc::now();
    let outcome = yard_scout::query::run(config)
        .await
        .context("Failed to start queries")?;

    let summary = report_outcome(&mut reporter, &outcome, started_at, config_hash)
        .context("Failed to write reports")?;

    if outcome.is_complete() {
        tracing::info!("All {} sources had hits", summary.source_count);
    } else if outcome.is_degraded() {
        tracing::warn!(
            "{} of {} sources had hits, some queries failed",
            summary.hit_count,
            summary.source_count
        );
    } else {
        tracing::warn!(
            "{} of {} sources had hits",
            summary.hit_count,
            summary.source_count
        );
    }

    Ok(exit_code(&outcome))
}

/// Maps a finished run onto the process exit status
fn exit_code(outcome: &QueryOutcome) -> u8 {
    if outcome.is_complete() {
        EXIT_COMPLETE
    } else {
        EXIT_DEGRADED
    }
}
