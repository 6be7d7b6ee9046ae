//! Crawl frontier for the catalog walk
//!
//! This module handles:
//! - FIFO queue of pages waiting to be visited
//! - Visited-set membership so no page is fetched twice
//! - The hard page cap guarding against cyclic or endless pagination

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Breadth-first frontier owned by a single crawl
#[derive(Debug)]
pub struct Frontier {
    /// URLs already dequeued for visiting
    visited: HashSet<Url>,

    /// URLs waiting to be visited, oldest first
    pending: VecDeque<Url>,

    /// Maximum number of pages handed out
    max_pages: u32,

    /// Pages handed out so far
    pages_visited: u32,
}

impl Frontier {
    /// Creates a frontier seeded with one URL
    pub fn new(seed: Url, max_pages: u32) -> Self {
        Self {
            visited: HashSet::new(),
            pending: VecDeque::from([seed]),
            max_pages,
            pages_visited: 0,
        }
    }

    /// Marks a URL as visited without handing it out
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.clone());
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Queues a URL at the back unless it has already been visited
    ///
    /// # Returns
    ///
    /// `true` if the URL was queued
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.is_visited(&url) {
            return false;
        }
        self.pending.push_back(url);
        true
    }

    /// Hands out the next unvisited URL and marks it visited
    ///
    /// Returns `None` once the queue is drained or the page cap is reached.
    /// Already-visited entries are skipped without counting against the cap.
    pub fn next_page(&mut self) -> Option<Url> {
        while self.pages_visited < self.max_pages {
            let url = self.pending.pop_front()?;
            if self.visited.insert(url.clone()) {
                self.pages_visited += 1;
                return Some(url);
            }
        }
        None
    }

    pub fn pages_visited(&self) -> u32 {
        self.pages_visited
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if the cap stopped the walk with work still queued
    pub fn cap_reached(&self) -> bool {
        self.pages_visited >= self.max_pages && !self.pending.is_empty()
    }
}
