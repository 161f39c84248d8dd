//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - HTML parsing and link extraction with parser fallback
//! - The FIFO frontier and visited/discovered bookkeeping
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlReport, Crawler};
pub use fetcher::{build_http_client, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use frontier::{CrawlState, Frontier};
pub use parser::{
    DocumentStrategy, FragmentStrategy, LinkExtraction, LinkExtractor, ParseStrategy,
    RegexStrategy, StrategyError,
};

use crate::config::{validate, Config};
use crate::url::{normalize_url, ScopeDomain};
use crate::Result;

/// Crawls a site and returns the discovered page URLs
///
/// Uses the default HTTP settings and politeness delay. Never fails: if
/// nothing is discovered, or the crawl cannot start (unusable seed, HTTP
/// client error), the result is the seed exactly as given.
///
/// # Arguments
///
/// * `base_url` - The seed URL; a missing scheme defaults to `https://`
/// * `max_pages` - Upper bound on pages fetched successfully
pub async fn crawl_website(base_url: &str, max_pages: u32) -> Vec<String> {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages.max(1);

    match crawl_with_config(base_url, &config).await {
        Ok(report) => report.into_urls(),
        Err(e) => {
            tracing::error!("Failed to start crawl of {}: {}", base_url, e);
            vec![base_url.to_string()]
        }
    }
}

/// Runs a complete crawl with explicit configuration
///
/// Errors are setup errors only: an invalid configuration, a seed with no
/// usable scheme and host, or an HTTP client that cannot be built. Per-page
/// failures are recorded in the report's statistics.
pub async fn crawl_with_config(base_url: &str, config: &Config) -> Result<CrawlReport> {
    validate(config)?;
    ScopeDomain::from_seed(&normalize_url(base_url))?;

    let fetcher = HttpFetcher::new(&config.http)?;
    Ok(Crawler::new(fetcher, config.crawler.clone()).run(base_url).await)
}
