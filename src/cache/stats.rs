//! Cache Statistics Module
//!
//! Tracks read outcomes and how entries leave the cache.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CacheStats {
    /// Number of `get` calls that returned an entry
    pub hits: u64,
    /// Number of `get` calls that found nothing (absent or expired)
    pub misses: u64,
    /// Entries removed by `get` because they had expired
    pub lazy_evictions: u64,
    /// Entries removed by `delete_outdated` sweeps
    pub swept: u64,
    /// Current number of entries, expired-but-unswept included
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_lazy_eviction(&mut self) {
        self.lazy_evictions += 1;
    }

    pub fn record_swept(&mut self, count: usize) {
        self.swept += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
