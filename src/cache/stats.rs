//! Cache Statistics Module
//!
//! Point-in-time view of cache occupancy plus lifetime hit, miss and
//! eviction counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::entry::epoch;

// == Cache Stats ==
/// Snapshot of cache metrics, taken under a single lock acquisition.
///
/// Serializes to the StatsJSON object, e.g.
/// `{"Length":3,"Capacity":3,"OldestAccess":"2024-01-01T00:00:00Z",...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub length: usize,
    /// Maximum number of entries the cache may hold
    pub capacity: usize,
    /// Last access time of the least recently used entry (epoch when empty)
    pub oldest_access: DateTime<Utc>,
    /// Number of `get` calls that found their key
    pub hits: u64,
    /// Number of `get` calls that missed
    pub misses: u64,
    /// Number of entries evicted to honour the capacity
    pub evictions: u64,
}

impl Default for CacheStats {
    fn default() -> Self {
        Self {
            length: 0,
            capacity: 0,
            oldest_access: epoch(),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }
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
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset Counters ==
    /// Zeroes the hit, miss and eviction counters.
    pub fn reset_counters(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }
}
