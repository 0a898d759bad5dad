//! Key Index Module
//!
//! Maps keys to the recency-list slot holding their entry.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

// == Key Index ==
/// Exact-match lookup from key to slot.
///
/// Keys compare by content, and lookups accept any borrowed form of the key,
/// so a `String` key is found with a `&str` built from the same bytes.
#[derive(Debug)]
pub struct KeyIndex<K> {
    slots: HashMap<K, usize>,
}

impl<K> Default for KeyIndex<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq> KeyIndex<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookup ==
    /// Returns the slot for `key`, if indexed.
    pub fn get<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).copied()
    }

    // == Insert ==
    /// Indexes `key` at `slot`, returning the slot it replaced.
    pub fn insert(&mut self, key: K, slot: usize) -> Option<usize> {
        self.slots.insert(key, slot)
    }

    // == Remove ==
    /// Drops `key` from the index, returning its slot.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.remove(key)
    }

    // == Contains ==
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
