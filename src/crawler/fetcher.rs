//! HTTP fetcher implementation
//!
//! This module handles all outbound requests for the crawler, including:
//! - The `PageFetcher` seam the crawl loop is written against
//! - Building the reqwest client with browser-like headers
//! - Error classification (timeout, connect, request, body)

use crate::config::HttpConfig;
use crate::PagewalkError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching a single page
///
/// These are always recovered by the crawl loop: the URL is skipped and the
/// crawl continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Failed to read body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// A fetched response, before any status or content-type filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Page body as text
    pub body: String,
}

impl FetchedPage {
    /// Returns true for exactly HTTP 200
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// Returns true if the Content-Type mentions `html` in any casing
    pub fn is_html(&self) -> bool {
        self.content_type.to_ascii_lowercase().contains("html")
    }
}

/// Retrieves a single page
///
/// The crawl loop only ever talks to this trait, so tests can swap in an
/// in-memory site and a parallel engine could share one fetcher.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, returning status, content type and body
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// reqwest-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client configured from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, PagewalkError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(FetchedPage {
            status_code,
            content_type,
            body,
        })
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client carries the configured `User-Agent`, `Accept` and
/// `Accept-Language` headers and a whole-request timeout, follows redirects,
/// and skips TLS certificate validation when
/// `skip_certificate_validation` is set. That last setting is scoped to this
/// client only.
///
/// # Example
///
/// ```no_run
/// use pagewalk::config::HttpConfig;
/// use pagewalk::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, PagewalkError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)?,
    );

    if config.skip_certificate_validation {
        tracing::debug!("TLS certificate validation disabled for crawler client");
    }

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(config.skip_certificate_validation)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Maps a reqwest send error onto a [`FetchError`]
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            source: error,
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source: error,
        }
    }
}
