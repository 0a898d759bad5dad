//! Cache Handle Module
//!
//! A shared, possibly absent reference to an [`LruCache`].
//!
//! Callers that hold a cache which may not have been set up yet can use
//! [`CacheHandle`] and call accessors without checking first: an absent
//! handle answers every read with an empty result.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::entry::epoch;
use crate::cache::{CacheStats, Item, LruCache};

// == Cache Handle ==
/// Cheaply clonable handle that either shares a cache or is absent.
#[derive(Debug)]
pub struct CacheHandle<K, V> {
    inner: Option<Arc<LruCache<K, V>>>,
}

impl<K, V> Clone for CacheHandle<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for CacheHandle<K, V> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<K, V> From<LruCache<K, V>> for CacheHandle<K, V> {
    fn from(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Some(Arc::new(cache)),
        }
    }
}

impl<K, V> From<Arc<LruCache<K, V>>> for CacheHandle<K, V> {
    fn from(cache: Arc<LruCache<K, V>>) -> Self {
        Self { inner: Some(cache) }
    }
}

impl<K, V> CacheHandle<K, V> {
    // == Constructors ==
    /// Creates a handle with no cache behind it.
    pub fn absent() -> Self {
        Self { inner: None }
    }

    /// Returns true if a cache is attached.
    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    /// Borrows the attached cache, if any.
    pub fn as_cache(&self) -> Option<&LruCache<K, V>> {
        self.inner.as_deref()
    }
}

impl<K, V> CacheHandle<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a handle to a new cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        LruCache::new(capacity).into()
    }

    // == Reads ==
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.as_cache()?.get(key)
    }

    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.as_cache()?.peek(key)
    }

    pub fn keys(&self) -> Vec<K> {
        self.as_cache().map(LruCache::keys).unwrap_or_default()
    }

    pub fn items(&self) -> Vec<Item<K, V>> {
        self.as_cache().map(LruCache::items).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.as_cache().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.as_cache().map_or(0, LruCache::capacity)
    }

    /// Oldest access time, or the UNIX epoch when absent or empty.
    pub fn oldest(&self) -> DateTime<Utc> {
        self.as_cache().map_or_else(epoch, LruCache::oldest)
    }

    pub fn stats(&self) -> CacheStats {
        self.as_cache().map(LruCache::stats).unwrap_or_default()
    }

    /// Stats as JSON; an absent handle yields `{}`.
    pub fn stats_json(&self) -> String {
        match self.as_cache() {
            Some(cache) => cache.stats_json(),
            None => "{}".to_string(),
        }
    }

    // == Writes ==
    // Writes against an absent handle are dropped.

    pub fn set(&self, key: K, value: V) {
        match self.as_cache() {
            Some(cache) => cache.set(key, value),
            None => debug!("set on absent cache handle ignored"),
        }
    }

    pub fn set_if_absent(&self, key: K, value: V) {
        match self.as_cache() {
            Some(cache) => cache.set_if_absent(key, value),
            None => debug!("set_if_absent on absent cache handle ignored"),
        }
    }

    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.as_cache().is_some_and(|cache| cache.delete(key))
    }

    pub fn clear(&self) {
        if let Some(cache) = self.as_cache() {
            cache.clear();
        }
    }

    pub fn set_capacity(&self, capacity: usize) {
        match self.as_cache() {
            Some(cache) => cache.set_capacity(capacity),
            None => debug!(capacity, "set_capacity on absent cache handle ignored"),
        }
    }
}
