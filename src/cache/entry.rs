//! Cache Entry Module
//!
//! Defines the record held for every key in the cache.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A single key/value record with its last-access timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key identifying this entry
    pub key: K,
    /// The stored value
    pub value: V,
    /// Last time this entry was inserted, updated or read through `get`
    pub last_access: DateTime<Utc>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            last_access: Utc::now(),
        }
    }

    // == Touch ==
    /// Refreshes the last-access timestamp to now.
    pub fn touch(&mut self) {
        self.last_access = Utc::now();
    }

    // == Replace ==
    /// Swaps in a new value and refreshes the timestamp.
    ///
    /// Returns the previous value.
    pub fn replace(&mut self, value: V) -> V {
        self.touch();
        std::mem::replace(&mut self.value, value)
    }
}

// == Utility Functions ==
/// Timestamp reported when there is no entry to report on.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}
