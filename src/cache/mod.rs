//! Cache Module
//!
//! Provides a thread-safe LRU cache built from a slot-arena recency list and
//! a key index.

mod entry;
mod handle;
mod index;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{epoch, CacheEntry};
pub use handle::CacheHandle;
pub use index::KeyIndex;
pub use lru::{Iter, RecencyList};
pub use stats::CacheStats;
pub use store::{Item, LruCache};
