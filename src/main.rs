//! Pagewalk main entry point
//!
//! This is the command-line interface for the Pagewalk site crawler.

use anyhow::Context;
use clap::Parser;
use pagewalk::config::{load_config, validate, Config};
use pagewalk::crawler::crawl_with_config;
use pagewalk::output::{write_report, write_statistics, OutputFormat};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagewalk: a same-domain site inventory crawler
///
/// Pagewalk crawls a website breadth-first from a seed URL, stays on the
/// seed's scheme and host, and prints the HTML page URLs it discovered.
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(version)]
#[command(about = "A same-domain site inventory crawler", long_about = None)]
struct Cli {
    /// Seed URL; a missing scheme defaults to https://
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of pages to fetch successfully
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Pause before every fetch, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Request timeout, in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format for discovered URLs
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    tracing::debug!(
        "Using max-pages={} fetch-delay-ms={} timeout-secs={}",
        config.crawler.max_pages,
        config.crawler.fetch_delay_ms,
        config.http.timeout_secs
    );

    let report = crawl_with_config(&cli.url, &config)
        .await
        .context("Failed to start crawl")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&report, cli.format, &mut out)?;
    out.flush()?;

    if !cli.quiet {
        write_statistics(&report.stats, &mut io::stderr().lock())?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagewalk=info,warn"),
            1 => EnvFilter::new("pagewalk=debug,info"),
            2 => EnvFilter::new("pagewalk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the URL list
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), then applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.fetch_delay_ms = delay_ms;
    }
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
