//! Per-URL outcome definitions for a crawl
//!
//! Every URL popped from the frontier ends in exactly one of these outcomes.

use crate::PagewalkError;
use std::fmt;

/// Represents what happened to a URL taken from the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    // ===== Success =====
    /// Page was fetched as HTML and its links were extracted
    Visited,

    // ===== Skips (page neither visited nor expanded) =====
    /// Network error, timeout, DNS failure or unreadable body
    FetchFailed,

    /// Server answered with a status other than 200
    NonSuccessStatus,

    /// Content-Type did not mention HTML
    ContentMismatch,
}

impl PageOutcome {
    /// Returns true if the page counts toward the page budget
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Visited)
    }

    /// Returns true if the page was skipped
    pub fn is_skip(&self) -> bool {
        !self.is_success()
    }

    /// Classifies a per-page error into its outcome
    ///
    /// Returns `None` for errors that are not about a single page (setup,
    /// configuration and output errors).
    pub fn from_error(error: &PagewalkError) -> Option<Self> {
        match error {
            PagewalkError::Fetch(_) => Some(Self::FetchFailed),
            PagewalkError::NonSuccessStatus { .. } => Some(Self::NonSuccessStatus),
            PagewalkError::UnsupportedContentType { .. } => Some(Self::ContentMismatch),
            _ => None,
        }
    }

    /// Stable lower-case name used in logs and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visited => "visited",
            Self::FetchFailed => "fetch_failed",
            Self::NonSuccessStatus => "non_success_status",
            Self::ContentMismatch => "content_mismatch",
        }
    }

    /// Returns all possible outcomes
    pub fn all_outcomes() -> [Self; 4] {
        [
            Self::Visited,
            Self::FetchFailed,
            Self::NonSuccessStatus,
            Self::ContentMismatch,
        ]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
