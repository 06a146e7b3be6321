//! Per-crawl scheduling state
//!
//! This module handles:
//! - The seen set that keeps a URL from being scheduled twice in one crawl
//! - The token pool that bounds concurrent page fetches and robots.txt checks
//! - The depth budget for discovered links

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use tokio::sync::{Semaphore, SemaphorePermit};

/// A page fetch that has been scheduled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// Absolute URL of the page
    pub uri: String,

    /// Link hops from the seed (the seed is depth 0)
    pub depth: u32,
}

/// Scheduler owns the state of a single crawl invocation
///
/// Nothing here is shared between crawls: each invocation starts with an
/// empty seen set and a full token pool.
pub struct Scheduler {
    /// Token pool limiting in-flight page fetches
    tokens: Semaphore,

    /// Absolute URLs already scheduled in this crawl
    seen: Mutex<HashSet<String>>,

    /// Exclusive upper bound on link depth
    max_depth: u32,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `max_parallel` - Number of network requests allowed in flight at once
    /// * `max_depth` - Links at this depth or deeper are never scheduled
    pub fn new(max_parallel: usize, max_depth: u32) -> Self {
        Self {
            tokens: Semaphore::new(max_parallel),
            seen: Mutex::new(HashSet::new()),
            max_depth,
        }
    }

    /// Returns whether a link at `depth` may still be scheduled
    pub fn within_depth(&self, depth: u32) -> bool {
        depth < self.max_depth
    }

    /// Marks a URL as seen
    ///
    /// The membership check and the insert happen under one lock.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not seen before and now belongs to the caller
    /// * `false` - The URL was already claimed
    pub fn mark_seen(&self, url: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.insert(url.to_string())
    }

    /// Number of distinct URLs claimed so far
    pub fn seen_count(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Waits for a fetch token
    ///
    /// The token is returned to the pool when the permit is dropped. Returns
    /// `None` only if the pool has been closed.
    pub async fn acquire(&self) -> Option<SemaphorePermit<'_>> {
        self.tokens.acquire().await.ok()
    }

    /// Number of fetch tokens currently free
    pub fn available_tokens(&self) -> usize {
        self.tokens.available_permits()
    }
}
