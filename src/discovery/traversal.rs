//! Breadth-first traversal state shared by the sitemap walker and the crawler.

use std::collections::{HashSet, VecDeque};

/// FIFO frontier plus visited set over string-keyed nodes.
///
/// A key is accepted by [`Traversal::enqueue`] at most once over the whole
/// traversal, whether it is still pending or already visited, so a cyclic graph
/// drains in finite time. Keys come out in first-enqueued order.
#[derive(Debug, Default)]
pub struct Traversal {
    pending: VecDeque<String>,
    known: HashSet<String>,
    visited: HashSet<String>,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` to the back of the frontier.
    ///
    /// Returns `false` if the key was already pending or visited.
    pub fn enqueue(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.known.contains(&key) {
            return false;
        }
        self.known.insert(key.clone());
        self.pending.push_back(key);
        true
    }

    /// Takes the next pending key and marks it visited.
    pub fn pop_next(&mut self) -> Option<String> {
        let key = self.pending.pop_front()?;
        self.visited.insert(key.clone());
        Some(key)
    }

    /// Takes up to `limit` pending keys, marking each visited.
    pub fn next_batch(&mut self, limit: usize) -> Vec<String> {
        let mut batch = Vec::with_capacity(limit.min(self.pending.len()));
        while batch.len() < limit {
            match self.pop_next() {
                Some(key) => batch.push(key),
                None => break,
            }
        }
        batch
    }

    pub fn is_visited(&self, key: &str) -> bool {
        self.visited.contains(key)
    }

    /// Whether the key is pending or visited.
    pub fn is_known(&self, key: &str) -> bool {
        self.known.contains(key)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}
