//! Mini LRU - An embeddable, capacity-bounded LRU cache
//!
//! Provides O(1) lookup, promotion and eviction behind a single lock, plus
//! the introspection (length, capacity, oldest access) operators need to
//! judge cache health.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheHandle, CacheStats, Item, LruCache};
pub use config::{clamp_capacity, CacheConfig};
pub use error::{CacheError, Result};
