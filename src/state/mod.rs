//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageOutcome`: what happened to each URL taken from the frontier

mod page_outcome;

// Re-export main types
pub use page_outcome::PageOutcome;
