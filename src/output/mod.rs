//! Output module for crawl results
//!
//! This module handles:
//! - Writing discovered URLs as plain text or JSON
//! - Recording crawl statistics

pub mod stats;

pub use stats::{write_statistics, CrawlStats};

use crate::crawler::CrawlReport;
use crate::Result;
use serde::Serialize;
use std::io::Write;

/// How a crawl report is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One URL per line
    #[default]
    Text,

    /// A single JSON object with the seed, URLs, visited pages and statistics
    Json,
}

/// JSON view of a report; `urls` already has the seed fallback applied
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    seed: &'a str,
    urls: Vec<String>,
    visited: &'a [String],
    stats: &'a CrawlStats,
}

/// Writes the report's URLs in the requested format
pub fn write_report<W: Write>(
    report: &CrawlReport,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for url in report.urls() {
                writeln!(out, "{}", url)?;
            }
        }
        OutputFormat::Json => {
            let json = JsonReport {
                seed: &report.seed,
                urls: report.urls(),
                visited: &report.visited,
                stats: &report.stats,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
