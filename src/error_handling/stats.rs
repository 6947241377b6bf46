//! Chain error statistics.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::ChainErrorKind;

/// Counts chain failures by category over one audit run.
///
/// The audit drives a single control flow, so plain counters suffice. All
/// categories are initialized to zero on creation.
#[derive(Debug, Clone)]
pub struct ChainErrorStats {
    counts: HashMap<ChainErrorKind, usize>,
}

impl Default for ChainErrorStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainErrorStats {
    pub fn new() -> Self {
        let counts = ChainErrorKind::iter().map(|kind| (kind, 0)).collect();
        ChainErrorStats { counts }
    }

    /// Increment the counter of one category.
    pub fn increment(&mut self, kind: ChainErrorKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Count of one category.
    pub fn get(&self, kind: ChainErrorKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
