//! Crawl statistics
//!
//! Counters collected by the crawl loop, plus a human-readable summary.

use crate::state::PageOutcome;
use serde::Serialize;
use std::io::{self, Write};

/// Counters for one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Fetch attempts made (each preceded by the politeness delay)
    pub fetch_attempts: u64,

    /// Pages fetched as HTML with status 200
    pub pages_visited: u64,

    /// Network errors and timeouts
    pub fetch_failures: u64,

    /// Responses with a status other than 200
    pub non_success_statuses: u64,

    /// Responses whose Content-Type was not HTML
    pub non_html_skipped: u64,

    /// Pages whose links came from a fallback parser
    pub parser_fallbacks: u64,

    /// Pages where every parser failed
    pub parse_failures: u64,

    /// Raw hrefs seen on visited pages
    pub links_found: u64,

    /// Empty, `javascript:` and bare `#` hrefs
    pub links_ignored: u64,

    /// Hrefs that could not be resolved to an absolute URL
    pub links_malformed: u64,

    /// Links on another scheme or host
    pub links_out_of_scope: u64,

    /// Links to images, archives, scripts and other non-documents
    pub links_excluded: u64,

    /// Links added to the discovered set
    pub links_discovered: u64,

    /// Wall-clock duration of the crawl
    pub elapsed_ms: u64,
}

impl CrawlStats {
    /// Counts a URL's outcome
    pub fn record_outcome(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Visited => self.pages_visited += 1,
            PageOutcome::FetchFailed => self.fetch_failures += 1,
            PageOutcome::NonSuccessStatus => self.non_success_statuses += 1,
            PageOutcome::ContentMismatch => self.non_html_skipped += 1,
        }
    }

    /// Number of URLs that ended in `outcome`
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        match outcome {
            PageOutcome::Visited => self.pages_visited,
            PageOutcome::FetchFailed => self.fetch_failures,
            PageOutcome::NonSuccessStatus => self.non_success_statuses,
            PageOutcome::ContentMismatch => self.non_html_skipped,
        }
    }

    /// Number of URLs that were skipped for any reason
    pub fn pages_skipped(&self) -> u64 {
        PageOutcome::all_outcomes()
            .into_iter()
            .filter(PageOutcome::is_skip)
            .map(|outcome| self.count(outcome))
            .sum()
    }
}

/// Writes the statistics in a formatted manner
pub fn write_statistics<W: Write>(stats: &CrawlStats, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===")?;
    writeln!(out)?;

    writeln!(out, "Pages:")?;
    writeln!(out, "  Fetch attempts: {}", stats.fetch_attempts)?;
    writeln!(out, "  Skipped: {}", stats.pages_skipped())?;
    for outcome in PageOutcome::all_outcomes() {
        let count = stats.count(outcome);
        if count > 0 {
            writeln!(out, "  {}: {}", outcome, count)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Links:")?;
    writeln!(out, "  Found: {}", stats.links_found)?;
    writeln!(out, "  Discovered: {}", stats.links_discovered)?;
    writeln!(out, "  Out of scope: {}", stats.links_out_of_scope)?;
    writeln!(out, "  Excluded by extension: {}", stats.links_excluded)?;
    writeln!(out, "  Ignored: {}", stats.links_ignored)?;
    writeln!(out, "  Malformed: {}", stats.links_malformed)?;
    writeln!(out)?;

    if stats.parser_fallbacks > 0 || stats.parse_failures > 0 {
        writeln!(out, "Parsing:")?;
        writeln!(out, "  Fallback parser used: {}", stats.parser_fallbacks)?;
        writeln!(out, "  All parsers failed: {}", stats.parse_failures)?;
        writeln!(out)?;
    }

    let success_rate = if stats.fetch_attempts > 0 {
        (stats.pages_visited as f64 / stats.fetch_attempts as f64) * 100.0
    } else {
        0.0
    };

    writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} fetches visited) in {:.2}s",
        success_rate,
        stats.pages_visited,
        stats.fetch_attempts,
        stats.elapsed_ms as f64 / 1000.0
    )
}
