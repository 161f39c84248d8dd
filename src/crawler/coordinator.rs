//! Crawler coordinator - main crawl loop
//!
//! This module contains the loop that coordinates one crawl:
//! - Seeding the frontier with the normalized seed URL
//! - Pausing before every fetch
//! - Filtering responses by status and content type
//! - Extracting, resolving, scoping and filtering links
//! - Enforcing the page budget and assembling the report

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::{CrawlState, Frontier};
use crate::crawler::parser::{LinkExtraction, LinkExtractor};
use crate::output::CrawlStats;
use crate::state::PageOutcome;
use crate::url::{
    has_excluded_extension, is_web_scheme, normalize_url, strip_trailing_slash, ScopeDomain,
};
use crate::PagewalkError;
use serde::Serialize;
use std::time::{Duration, Instant};
use url::Url;

/// Result of a crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The seed URL exactly as the caller passed it
    pub seed: String,

    /// Filtered, in-scope link targets in discovery order
    pub discovered: Vec<String>,

    /// Pages fetched as HTML, in visit order
    pub visited: Vec<String>,

    /// Counters collected during the crawl
    pub stats: CrawlStats,
}

impl CrawlReport {
    /// A report for a crawl that never got to fetch anything
    pub fn empty(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            discovered: Vec::new(),
            visited: Vec::new(),
            stats: CrawlStats::default(),
        }
    }

    /// The discovered URLs, or the original seed if nothing was discovered
    pub fn urls(&self) -> Vec<String> {
        if self.discovered.is_empty() {
            vec![self.seed.clone()]
        } else {
            self.discovered.clone()
        }
    }

    /// Consumes the report, applying the same fallback as [`CrawlReport::urls`]
    pub fn into_urls(self) -> Vec<String> {
        if self.discovered.is_empty() {
            vec![self.seed]
        } else {
            self.discovered
        }
    }
}

/// Main crawler structure
///
/// The crawler owns its frontier and sets for the duration of one
/// [`Crawler::run`] call and performs exactly one fetch at a time.
pub struct Crawler<F> {
    fetcher: F,
    extractor: LinkExtractor,
    config: CrawlerConfig,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler using the default link extractor
    pub fn new(fetcher: F, config: CrawlerConfig) -> Self {
        Self {
            fetcher,
            extractor: LinkExtractor::new(),
            config,
        }
    }

    /// Replaces the link extractor
    pub fn with_extractor(mut self, extractor: LinkExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// The pause applied before every fetch
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.config.fetch_delay_ms)
    }

    /// Crawls from `seed` until the frontier is empty or the page budget is spent
    ///
    /// Per-page failures (network errors, non-200 statuses, non-HTML
    /// responses, unparseable HTML, malformed links) are logged and skipped;
    /// this never fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pagewalk::config::{CrawlerConfig, HttpConfig};
    /// use pagewalk::crawler::{Crawler, HttpFetcher};
    ///
    /// # async fn example() -> Result<(), pagewalk::PagewalkError> {
    /// let fetcher = HttpFetcher::new(&HttpConfig::default())?;
    /// let report = Crawler::new(fetcher, CrawlerConfig::default())
    ///     .run("https://example.com")
    ///     .await;
    /// for url in report.urls() {
    ///     println!("{}", url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(&self, seed: &str) -> CrawlReport {
        tracing::info!("Starting to crawl: {}", seed);
        let start_time = Instant::now();

        let normalized_seed = normalize_url(seed);
        let scope = match ScopeDomain::from_seed(&normalized_seed) {
            Ok(scope) => scope,
            Err(e) => {
                tracing::error!("Cannot crawl {}: {}", seed, e);
                return CrawlReport::empty(seed);
            }
        };
        tracing::debug!(
            "Scope domain: {}://{} (seed normalized to {})",
            scope.scheme(),
            scope.host(),
            normalized_seed
        );

        let max_pages = self.config.max_pages as usize;
        let mut frontier = Frontier::new();
        let mut state = CrawlState::new();
        let mut stats = CrawlStats::default();
        frontier.push(normalized_seed);

        while state.visited_count() < max_pages {
            let url = match frontier.pop() {
                Some(url) => url,
                None => break,
            };

            // The seed can come back through a link before it is visited
            if state.is_visited(&url) {
                continue;
            }

            tokio::time::sleep(self.fetch_delay()).await;
            stats.fetch_attempts += 1;
            tracing::info!("Crawling: {}", url);

            let body = match self.fetch_html(&url).await {
                Ok(body) => body,
                Err(e) => {
                    log_skip(&e);
                    if let Some(outcome) = PageOutcome::from_error(&e) {
                        stats.record_outcome(outcome);
                    }
                    continue;
                }
            };

            state.mark_visited(&url);
            stats.record_outcome(PageOutcome::Visited);

            let hrefs = self.extract_links(&body, &mut stats);
            match Url::parse(&url) {
                Ok(page_url) => {
                    expand_links(&page_url, &hrefs, &scope, &mut state, &mut frontier, &mut stats)
                }
                Err(e) => {
                    tracing::debug!("Cannot resolve links against {}: {}", url, e);
                    stats.links_found += hrefs.len() as u64;
                    stats.links_malformed += hrefs.len() as u64;
                }
            }

            if state.visited_count() % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} discovered, {} in frontier",
                    state.visited_count(),
                    state.discovered_count(),
                    frontier.len()
                );
            }
        }

        if !frontier.is_empty() {
            tracing::info!(
                "Page budget of {} reached with {} URLs left in frontier",
                max_pages,
                frontier.len()
            );
        }

        stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
        tracing::info!(
            "Crawling complete. Discovered {} URLs.",
            state.discovered_count()
        );

        let (visited, discovered) = state.into_parts();
        CrawlReport {
            seed: seed.to_string(),
            discovered,
            visited,
            stats,
        }
    }

    /// Fetches `url` and returns its body if it is a 200 HTML response
    async fn fetch_html(&self, url: &str) -> Result<String, PagewalkError> {
        let page = self.fetcher.fetch(url).await?;

        if !page.is_ok() {
            return Err(PagewalkError::NonSuccessStatus {
                url: url.to_string(),
                status: page.status_code,
            });
        }

        if !page.is_html() {
            return Err(PagewalkError::UnsupportedContentType {
                url: url.to_string(),
                content_type: page.content_type,
            });
        }

        Ok(page.body)
    }

    /// Runs the link extractor, counting parser fallbacks and failures
    fn extract_links(&self, body: &str, stats: &mut CrawlStats) -> Vec<String> {
        let extraction = self.extractor.extract(body);
        match &extraction {
            LinkExtraction::Exhausted => stats.parse_failures += 1,
            LinkExtraction::Parsed { strategy, .. } => {
                if self.extractor.strategy_names().first() != Some(strategy) {
                    stats.parser_fallbacks += 1;
                }
            }
        }
        extraction.into_links()
    }
}

/// Resolves, scopes and filters the hrefs of one page, enqueueing new URLs
fn expand_links(
    page_url: &Url,
    hrefs: &[String],
    scope: &ScopeDomain,
    state: &mut CrawlState,
    frontier: &mut Frontier,
    stats: &mut CrawlStats,
) {
    for raw in hrefs {
        stats.links_found += 1;

        let href = raw.trim();
        if href.is_empty() || href.starts_with("javascript:") || href == "#" {
            stats.links_ignored += 1;
            continue;
        }

        let resolved = match page_url.join(href) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!("Dropping malformed link {:?} on {}: {}", href, page_url, e);
                stats.links_malformed += 1;
                continue;
            }
        };

        if !is_web_scheme(&resolved) || !scope.contains(&resolved) {
            stats.links_out_of_scope += 1;
            continue;
        }

        let normalized = normalize_url(resolved.as_str());
        if has_excluded_extension(&normalized) {
            stats.links_excluded += 1;
            continue;
        }

        let candidate = strip_trailing_slash(&normalized).into_owned();
        if state.discover(&candidate) {
            tracing::trace!("Discovered {}", candidate);
            stats.links_discovered += 1;
            frontier.push(candidate);
        }
    }
}

/// Logs why a page was skipped
fn log_skip(error: &PagewalkError) {
    match error {
        PagewalkError::UnsupportedContentType { .. } => tracing::info!("{}", error),
        PagewalkError::NonSuccessStatus { .. } => tracing::warn!("{}", error),
        _ => tracing::warn!("Error crawling: {}", error),
    }
}
