//! Cache Store Module
//!
//! Main cache engine combining the key index with the recency list behind a
//! single lock.

use std::borrow::Borrow;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, error};

use crate::cache::entry::epoch;
use crate::cache::{CacheEntry, CacheStats, KeyIndex, RecencyList};
use crate::config::CacheConfig;
use crate::error::Result;

// == Item ==
/// A key/value pair copied out of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<K, V> {
    pub key: K,
    pub value: V,
}

// == Cache State ==
/// Everything guarded by the cache lock.
#[derive(Debug)]
struct CacheState<K, V> {
    /// Key to slot lookup
    index: KeyIndex<K>,
    /// Entries ordered most to least recently used
    order: RecencyList<K, V>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime counters
    stats: CacheStats,
    /// Whether counters are maintained
    track_stats: bool,
}

impl<K, V> CacheState<K, V>
where
    K: Hash + Eq + Clone,
{
    fn insert(&mut self, key: K, value: V) {
        let slot = self.order.push_front(CacheEntry::new(key.clone(), value));
        self.index.insert(key, slot);
        self.evict_to_capacity();
    }

    /// Drops tail entries until the capacity holds again.
    fn evict_to_capacity(&mut self) -> usize {
        let mut evicted = 0;
        while self.order.len() > self.capacity {
            let Some(entry) = self.order.remove_tail() else {
                break;
            };
            self.index.remove(&entry.key);
            if self.track_stats {
                self.stats.record_eviction();
            }
            evicted += 1;
        }

        if evicted > 0 {
            debug!(
                evicted,
                capacity = self.capacity,
                "evicted least recently used entries"
            );
        }
        evicted
    }

    fn oldest(&self) -> DateTime<Utc> {
        self.order
            .peek_tail()
            .map(|entry| entry.last_access)
            .unwrap_or_else(epoch)
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            length: self.order.len(),
            capacity: self.capacity,
            oldest_access: self.oldest(),
            ..self.stats.clone()
        }
    }
}

// == LRU Cache ==
/// Thread-safe, capacity-bounded cache with least-recently-used eviction.
///
/// Every operation takes the same lock for its whole duration, so operations
/// from different threads appear in a single total order. Lookup, insert,
/// promotion and eviction of one entry are all O(1).
///
/// ```
/// use mini_lru::LruCache;
///
/// let cache = LruCache::new(2);
/// cache.set("a".to_string(), 1);
/// cache.set("b".to_string(), 2);
/// cache.get("a");
/// cache.set("c".to_string(), 3);
///
/// assert_eq!(cache.keys(), vec!["c", "a"]);
/// assert_eq!(cache.peek("b"), None);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    state: Mutex<CacheState<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::from_config(&CacheConfig::with_capacity(capacity))
    }

    /// Creates an empty cache from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState {
                index: KeyIndex::new(),
                order: RecencyList::new(),
                capacity: config.capacity,
                stats: CacheStats::new(),
                track_stats: config.track_stats,
            }),
        }
    }

    // == Set ==
    /// Stores a value, making the key the most recently used.
    ///
    /// An existing key has its value replaced in place. A new key may push
    /// the least recently used entries out; with a capacity of 0 the new
    /// entry itself is evicted straight away.
    pub fn set(&self, key: K, value: V) {
        let mut state = self.state.lock();

        if let Some(slot) = state.index.get(&key) {
            if let Some(entry) = state.order.get_mut(slot) {
                entry.replace(value);
            }
            state.order.move_to_front(slot);
            return;
        }

        state.insert(key, value);
    }

    // == Set If Absent ==
    /// Stores a value only if the key is not already cached.
    ///
    /// A present key keeps both its value and its position.
    pub fn set_if_absent(&self, key: K, value: V) {
        let mut state = self.state.lock();

        if state.index.get(&key).is_some() {
            return;
        }

        state.insert(key, value);
    }

    // == Get ==
    /// Returns a copy of the value, promoting the entry to most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.state.lock();

        let Some(slot) = state.index.get(key) else {
            if state.track_stats {
                state.stats.record_miss();
            }
            return None;
        };

        let value = state.order.get_mut(slot).map(|entry| {
            entry.touch();
            entry.value.clone()
        });
        state.order.move_to_front(slot);
        if state.track_stats {
            state.stats.record_hit();
        }
        value
    }

    // == Peek ==
    /// Returns a copy of the value without touching recency or counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let state = self.state.lock();
        let slot = state.index.get(key)?;
        state.order.get(slot).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Checks whether a key is cached, without touching recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.lock().index.get(key).is_some()
    }

    // == Delete ==
    /// Removes a key. Returns false if it was not cached.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.state.lock();

        match state.index.remove(key) {
            Some(slot) => state.order.remove(slot).is_some(),
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry. Capacity and counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.order.len();
        state.index.clear();
        state.order.clear();
        debug!(dropped, "cache cleared");
    }

    // == Set Capacity ==
    /// Changes the capacity, evicting least recently used entries if the
    /// cache is now over it.
    pub fn set_capacity(&self, capacity: usize) {
        let mut state = self.state.lock();
        let previous = state.capacity;
        state.capacity = capacity;
        debug!(previous, capacity, "cache capacity changed");
        state.evict_to_capacity();
    }

    // == Keys ==
    /// Snapshot of the keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        let state = self.state.lock();
        state.order.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Items ==
    /// Snapshot of the key/value pairs, most recently used first.
    pub fn items(&self) -> Vec<Item<K, V>> {
        let state = self.state.lock();
        state
            .order
            .iter()
            .map(|entry| Item {
                key: entry.key.clone(),
                value: entry.value.clone(),
            })
            .collect()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.state.lock().order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.state.lock().capacity
    }

    // == Oldest ==
    /// Last access time of the least recently used entry.
    ///
    /// Returns the UNIX epoch when the cache is empty.
    pub fn oldest(&self) -> DateTime<Utc> {
        self.state.lock().oldest()
    }

    // == Stats ==
    /// Returns length, capacity, oldest access time and counters as one
    /// consistent snapshot.
    pub fn stats(&self) -> CacheStats {
        self.state.lock().snapshot()
    }

    /// Zeroes the hit, miss and eviction counters.
    pub fn reset_stats(&self) {
        self.state.lock().stats.reset_counters();
    }

    // == Stats JSON ==
    /// Encodes [`stats`](Self::stats) as a JSON object.
    pub fn try_stats_json(&self) -> Result<String> {
        let stats = self.stats();
        Ok(serde_json::to_string(&stats)?)
    }

    /// Encodes [`stats`](Self::stats) as a JSON object, falling back to `{}`
    /// if encoding fails.
    pub fn stats_json(&self) -> String {
        self.try_stats_json().unwrap_or_else(|err| {
            error!(%err, "failed to encode cache stats");
            "{}".to_string()
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn filled(capacity: usize, keys: &[&str]) -> LruCache<String, String> {
        let cache = LruCache::new(capacity);
        for key in keys {
            cache.set(key.to_string(), format!("value_{}", key));
        }
        cache
    }

    #[test]
    fn test_cache_new() {
        let cache: LruCache<String, String> = LruCache::new(5);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 5);
        assert!(cache.is_empty());
        assert_eq!(cache.oldest(), epoch());
    }

    #[test]
    fn test_cache_from_config() {
        let config = CacheConfig {
            capacity: 7,
            track_stats: false,
        };
        let cache: LruCache<String, u32> = LruCache::from_config(&config);
        cache.get("missing");

        assert_eq!(cache.capacity(), 7);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_cache_set_and_get() {
        let cache = filled(100, &["key1"]);

        assert_eq!(cache.get("key1"), Some("value_key1".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_get_nonexistent() {
        let cache = filled(100, &[]);
        assert_eq!(cache.get("notthere"), None);
    }

    #[test]
    fn test_cache_overwrite_keeps_size_and_promotes() {
        let cache = filled(100, &["key1", "key2"]);

        cache.set("key1".to_string(), "new".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.keys(), vec!["key1", "key2"]);
        assert_eq!(cache.peek("key1"), Some("new".to_string()));
    }

    #[test]
    fn test_cache_set_if_absent_leaves_existing_untouched() {
        let cache = filled(100, &["key1", "key2"]);

        cache.set_if_absent("key1".to_string(), "other".to_string());

        assert_eq!(cache.peek("key1"), Some("value_key1".to_string()));
        assert_eq!(cache.keys(), vec!["key2", "key1"]);
    }

    #[test]
    fn test_cache_set_if_absent_inserts_and_evicts() {
        let cache = filled(2, &["key1", "key2"]);

        cache.set_if_absent("key3".to_string(), "value_key3".to_string());

        assert_eq!(cache.keys(), vec!["key3", "key2"]);
        assert!(!cache.contains("key1"));
    }

    #[test]
    fn test_cache_lru_eviction() {
        let cache = filled(3, &["key1", "key2", "key3", "key4"]);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("key1"), None);
        assert_eq!(cache.keys(), vec!["key4", "key3", "key2"]);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_cache_get_promotes_peek_does_not() {
        let cache = filled(3, &["key1", "key2", "key3"]);

        cache.peek("key1");
        assert_eq!(cache.keys(), vec!["key3", "key2", "key1"]);

        cache.get("key1");
        assert_eq!(cache.keys(), vec!["key1", "key3", "key2"]);

        cache.set("key4".to_string(), "value_key4".to_string());
        assert!(!cache.contains("key2"));
        assert!(cache.contains("key1"));
    }

    #[test]
    fn test_cache_get_refreshes_timestamp_peek_does_not() {
        let cache = filled(1, &["key1"]);
        let stamped = cache.oldest();

        sleep(Duration::from_millis(5));
        cache.peek("key1");
        assert_eq!(cache.oldest(), stamped);

        cache.get("key1");
        assert!(cache.oldest() > stamped);
    }

    #[test]
    fn test_cache_zero_capacity_holds_nothing() {
        let cache = filled(0, &["key1", "key2"]);

        assert_eq!(cache.len(), 0);
        assert!(cache.keys().is_empty());
        assert_eq!(cache.get("key1"), None);
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn test_cache_delete() {
        let cache = filled(100, &["key1", "key2"]);

        assert!(cache.delete("key1"));
        assert!(!cache.delete("key1"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.keys(), vec!["key2"]);
    }

    #[test]
    fn test_cache_delete_then_reinsert_reuses_slot() {
        let cache = filled(100, &["key1", "key2"]);

        cache.delete("key2");
        cache.set("key3".to_string(), "value_key3".to_string());

        assert_eq!(cache.keys(), vec!["key3", "key1"]);
        assert_eq!(cache.get("key3"), Some("value_key3".to_string()));
    }

    #[test]
    fn test_cache_clear_keeps_capacity() {
        let cache = filled(10, &["key1", "key2"]);

        cache.clear();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 10);
        assert!(cache.keys().is_empty());

        cache.set("key3".to_string(), "value_key3".to_string());
        assert_eq!(cache.keys(), vec!["key3"]);
    }

    #[test]
    fn test_cache_set_capacity_shrinks() {
        let cache = filled(5, &["key1", "key2", "key3", "key4", "key5"]);

        cache.set_capacity(2);

        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.keys(), vec!["key5", "key4"]);
        assert_eq!(cache.stats().evictions, 3);
    }

    #[test]
    fn test_cache_set_capacity_grows() {
        let cache = filled(1, &["key1"]);

        cache.set_capacity(3);
        cache.set("key2".to_string(), "value_key2".to_string());
        cache.set("key3".to_string(), "value_key3".to_string());

        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_cache_items_in_recency_order() {
        let cache = filled(10, &["a", "b"]);

        let items = cache.items();
        assert_eq!(
            items,
            vec![
                Item {
                    key: "b".to_string(),
                    value: "value_b".to_string()
                },
                Item {
                    key: "a".to_string(),
                    value: "value_a".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_cache_snapshots_do_not_follow_mutation() {
        let cache = filled(10, &["a", "b"]);

        let keys = cache.keys();
        cache.delete("a");
        cache.set("c".to_string(), "value_c".to_string());

        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_cache_stats_counters() {
        let cache = filled(10, &["key1"]);

        cache.get("key1");
        cache.get("missing");
        cache.peek("key1");

        let stats = cache.stats();
        assert_eq!(stats.length, 1);
        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.oldest_access, cache.oldest());

        cache.reset_stats();
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.length, 1);
    }

    #[test]
    fn test_cache_stats_json() {
        let cache = filled(3, &["key1", "key2"]);

        let json: serde_json::Value = serde_json::from_str(&cache.stats_json()).unwrap();
        assert_eq!(json["Length"], 2);
        assert_eq!(json["Capacity"], 3);

        let decoded: CacheStats = serde_json::from_str(&cache.try_stats_json().unwrap()).unwrap();
        assert_eq!(decoded.oldest_access, cache.oldest());
    }
}
