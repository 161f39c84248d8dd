//! Pagewalk: a same-domain site inventory crawler
//!
//! This crate crawls a website from a seed URL, stays on the seed's scheme and
//! host, and returns the set of HTML page URLs it discovered within a page
//! budget.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Pagewalk operations
///
/// Most variants describe why a single page was skipped. The crawl loop logs
/// and counts them; none of them aborts a crawl.
#[derive(Debug, Error)]
pub enum PagewalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error("Failed to fetch {url}, status code: {status}")]
    NonSuccessStatus { url: String, status: u16 },

    #[error("Skipping non-HTML content at {url} ({content_type})")]
    UnsupportedContentType { url: String, content_type: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Pagewalk operations
pub type Result<T> = std::result::Result<T, PagewalkError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl_website, CrawlReport, Crawler};
pub use state::PageOutcome;
pub use url::{normalize_url, ParsedUrl, ScopeDomain};
