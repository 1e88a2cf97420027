//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// The hit, miss, and eviction counters cover the lifetime of one cache
/// instance; `entries` and `used_bytes` describe the directory at the
/// moment the snapshot was taken.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (missing, unreadable, or undecodable)
    pub misses: u64,
    /// Number of entries evicted to make room for new writes
    pub evictions: u64,
    /// Current number of entries on disk
    pub entries: usize,
    /// Current sum of entry sizes on disk
    pub used_bytes: u64,
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

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Evictions ==
    /// Adds one eviction run's removals to the eviction counter.
    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }
}
