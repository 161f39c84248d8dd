//! HTML link extraction
//!
//! Pages are parsed by an ordered chain of strategies. The first strategy
//! that succeeds provides the links; every failure is logged as a parser
//! fallback. When the whole chain fails the caller gets
//! [`LinkExtraction::Exhausted`] rather than an error.

use regex::Regex;
use scraper::{Html, Selector};
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;
use thiserror::Error;

/// Matches an opening `<a>` tag and captures its href (double, single or unquoted)
const ANCHOR_HREF_PATTERN: &str =
    r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#;

static ANCHOR_HREF_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(ANCHOR_HREF_PATTERN));

/// Why a single parse strategy gave up
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("parser panicked: {0}")]
    Panicked(String),

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("invalid pattern: {0}")]
    Pattern(String),
}

/// One way of pulling raw `<a href>` values out of an HTML body
pub trait ParseStrategy: Send + Sync {
    /// Short name used in fallback warnings
    fn name(&self) -> &'static str;

    /// Returns the raw (unresolved) href values in document order
    fn extract(&self, html: &str) -> Result<Vec<String>, StrategyError>;
}

/// Result of running the strategy chain over a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkExtraction {
    /// A strategy succeeded
    Parsed {
        strategy: &'static str,
        links: Vec<String>,
    },

    /// Every strategy failed; the page has no extractable links
    Exhausted,
}

impl LinkExtraction {
    /// The extracted links (empty when exhausted)
    pub fn links(&self) -> &[String] {
        match self {
            Self::Parsed { links, .. } => links,
            Self::Exhausted => &[],
        }
    }

    /// Consumes the extraction, returning the links
    pub fn into_links(self) -> Vec<String> {
        match self {
            Self::Parsed { links, .. } => links,
            Self::Exhausted => Vec::new(),
        }
    }

    /// Name of the strategy that produced the links
    pub fn strategy(&self) -> Option<&'static str> {
        match self {
            Self::Parsed { strategy, .. } => Some(strategy),
            Self::Exhausted => None,
        }
    }
}

/// Full HTML5 document parse with scraper
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStrategy;

impl ParseStrategy for DocumentStrategy {
    fn name(&self) -> &'static str {
        "html-document"
    }

    fn extract(&self, html: &str) -> Result<Vec<String>, StrategyError> {
        guarded(|| select_hrefs(&Html::parse_document(html)))?
    }
}

/// HTML5 fragment parse with scraper, for bodies that are not whole documents
#[derive(Debug, Default, Clone, Copy)]
pub struct FragmentStrategy;

impl ParseStrategy for FragmentStrategy {
    fn name(&self) -> &'static str {
        "html-fragment"
    }

    fn extract(&self, html: &str) -> Result<Vec<String>, StrategyError> {
        guarded(|| select_hrefs(&Html::parse_fragment(html)))?
    }
}

/// Regex scan over raw anchor tags; needs no tree at all
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexStrategy;

impl ParseStrategy for RegexStrategy {
    fn name(&self) -> &'static str {
        "regex-scan"
    }

    fn extract(&self, html: &str) -> Result<Vec<String>, StrategyError> {
        let anchor_re = ANCHOR_HREF_RE
            .as_ref()
            .map_err(|e| StrategyError::Pattern(e.to_string()))?;

        Ok(anchor_re
            .captures_iter(html)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .map(|m| decode_basic_entities(m.as_str()))
            .collect())
    }
}

/// Runs parse strategies in order until one succeeds
pub struct LinkExtractor {
    strategies: Vec<Box<dyn ParseStrategy>>,
}

impl LinkExtractor {
    /// Creates the default chain: document, fragment, regex
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(DocumentStrategy),
            Box::new(FragmentStrategy),
            Box::new(RegexStrategy),
        ])
    }

    /// Creates an extractor with a custom strategy chain
    pub fn with_strategies(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extracts raw `<a href>` values from an HTML body
    ///
    /// # Example
    ///
    /// ```
    /// use pagewalk::crawler::LinkExtractor;
    ///
    /// let html = r#"<html><body><a href="/about">About</a></body></html>"#;
    /// let extraction = LinkExtractor::new().extract(html);
    /// assert_eq!(extraction.links(), ["/about"]);
    /// assert_eq!(extraction.strategy(), Some("html-document"));
    /// ```
    pub fn extract(&self, html: &str) -> LinkExtraction {
        for strategy in &self.strategies {
            match strategy.extract(html) {
                Ok(links) => {
                    return LinkExtraction::Parsed {
                        strategy: strategy.name(),
                        links,
                    }
                }
                Err(e) => {
                    tracing::warn!("Parser {} failed: {}", strategy.name(), e);
                }
            }
        }

        tracing::warn!("All parsers failed; treating page as having no links");
        LinkExtraction::Exhausted
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects `href` attributes of every `<a href>` in the tree
fn select_hrefs(document: &Html) -> Result<Vec<String>, StrategyError> {
    let selector =
        Selector::parse("a[href]").map_err(|e| StrategyError::Selector(e.to_string()))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Runs a parser, turning a panic into a strategy failure
fn guarded<T>(parse: impl FnOnce() -> T) -> Result<T, StrategyError> {
    panic::catch_unwind(AssertUnwindSafe(parse)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        StrategyError::Panicked(message)
    })
}

/// Decodes the entities that commonly appear inside href values
fn decode_basic_entities(raw: &str) -> String {
    raw.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
