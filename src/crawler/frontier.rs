//! Frontier queue and crawl bookkeeping
//!
//! This module handles:
//! - The FIFO queue of URLs waiting to be fetched
//! - The visited set (pages fetched as HTML)
//! - The discovered set (filtered link targets, kept in discovery order)
//!
//! Membership is tracked by [`page_key`], so `https://example.com` and
//! `https://example.com/` count as one page.

use crate::url::page_key;
use std::collections::{HashSet, VecDeque};

/// URLs waiting to be fetched, oldest first
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    queue: VecDeque<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL to the back of the queue
    pub fn push(&mut self, url: String) {
        self.queue.push_back(url);
    }

    /// Takes the next URL to fetch
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Number of queued URLs
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Visited and discovered sets for one crawl
#[derive(Debug, Default, Clone)]
pub struct CrawlState {
    visited_keys: HashSet<String>,
    visited: Vec<String>,
    discovered_keys: HashSet<String>,
    discovered: Vec<String>,
}

impl CrawlState {
    /// Creates empty sets
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `url` was already fetched as an HTML page
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_keys.contains(&page_key(url))
    }

    /// Records `url` as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if !self.visited_keys.insert(page_key(url)) {
            return false;
        }
        self.visited.push(url.to_string());
        true
    }

    /// Adds `url` to the discovered set unless it is already known
    ///
    /// Returns true when the URL is new and should be enqueued.
    pub fn discover(&mut self, url: &str) -> bool {
        let key = page_key(url);
        if self.visited_keys.contains(&key) || !self.discovered_keys.insert(key) {
            return false;
        }
        self.discovered.push(url.to_string());
        true
    }

    /// Number of visited pages
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of discovered URLs
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Consumes the state, returning (visited, discovered)
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.visited, self.discovered)
    }
}
