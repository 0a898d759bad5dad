//! Recency List Module
//!
//! Doubly-linked list of cache entries ordered by recency of use.
//!
//! Nodes live in a growable slot arena and point at their neighbours by slot
//! index, so relinking never needs more than one mutable borrow at a time.
//! Freed slots are recycled through a free list.

use crate::cache::CacheEntry;

// == Node ==
#[derive(Debug)]
struct Node<K, V> {
    entry: CacheEntry<K, V>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Orders entries by access time for LRU eviction.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Every structural operation is O(1). Slots handed out by
/// [`push_front`](Self::push_front) stay valid until the entry is removed.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Slot arena; `None` marks a free slot
    nodes: Vec<Option<Node<K, V>>>,
    /// Slot of the most recently used entry
    head: Option<usize>,
    /// Slot of the least recently used entry
    tail: Option<usize>,
    /// Free slots available for reuse
    free_list: Vec<usize>,
    /// Number of linked entries
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Links a new entry at the head and returns its slot.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> usize {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };

        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match self.head {
            Some(head_idx) => {
                if let Some(head) = self.nodes[head_idx].as_mut() {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Relinks an existing entry at the head without allocating.
    ///
    /// Unknown or free slots are ignored.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || !self.is_linked(idx) {
            return;
        }

        self.unlink(idx);

        let old_head = self.head;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = self.nodes[head_idx].as_mut() {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }

    // == Remove Tail ==
    /// Detaches and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn remove_tail(&mut self) -> Option<CacheEntry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Remove ==
    /// Detaches the entry stored in `idx` and frees the slot.
    pub fn remove(&mut self, idx: usize) -> Option<CacheEntry<K, V>> {
        if !self.is_linked(idx) {
            return None;
        }

        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(node.entry)
    }

    // == Accessors ==
    /// Returns the entry stored in `idx`.
    pub fn get(&self, idx: usize) -> Option<&CacheEntry<K, V>> {
        self.nodes
            .get(idx)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.entry)
    }

    /// Returns the entry stored in `idx` mutably.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut CacheEntry<K, V>> {
        self.nodes
            .get_mut(idx)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.entry)
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_tail(&self) -> Option<&CacheEntry<K, V>> {
        self.tail.and_then(|idx| self.get(idx))
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn is_linked(&self, idx: usize) -> bool {
        matches!(self.nodes.get(idx), Some(Some(_)))
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes[idx].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.nodes[prev_idx].as_mut() {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.nodes[next_idx].as_mut() {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Head-to-tail iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.nodes.get(idx)?.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
