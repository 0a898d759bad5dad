//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

use tracing::warn;

use crate::error::{CacheError, Result};

/// Environment variable holding the cache capacity.
pub const CAPACITY_VAR: &str = "LRU_CAPACITY";

/// Environment variable toggling hit/miss/eviction counters.
pub const TRACK_STATS_VAR: &str = "LRU_TRACK_STATS";

const DEFAULT_CAPACITY: usize = 1000;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Whether `get` hits/misses and evictions are counted
    pub track_stats: bool,
}

impl CacheConfig {
    /// Creates a config with the given capacity and default settings otherwise.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Loads a config from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum cache entries (default: 1000, negatives clamp to 0)
    /// - `LRU_TRACK_STATS` - `true`/`false`/`1`/`0` (default: true)
    ///
    /// Unset variables fall back to defaults; set but malformed values are
    /// reported as [`CacheError::InvalidConfig`].
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let capacity = match env::var(CAPACITY_VAR) {
            Ok(raw) => {
                let parsed: i64 = raw.trim().parse().map_err(|_| {
                    CacheError::InvalidConfig(format!("{CAPACITY_VAR}={raw:?} is not an integer"))
                })?;
                clamp_capacity(parsed)
            }
            Err(_) => defaults.capacity,
        };

        let track_stats = match env::var(TRACK_STATS_VAR) {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                CacheError::InvalidConfig(format!("{TRACK_STATS_VAR}={raw:?} is not a boolean"))
            })?,
            Err(_) => defaults.track_stats,
        };

        Ok(Self {
            capacity,
            track_stats,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            track_stats: true,
        }
    }
}

/// Converts a signed capacity into a usable one.
///
/// Negative values clamp to zero, which yields a cache that holds nothing.
pub fn clamp_capacity(capacity: i64) -> usize {
    if capacity < 0 {
        warn!(capacity, "negative cache capacity clamped to 0");
        return 0;
    }
    usize::try_from(capacity).unwrap_or(usize::MAX)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
