//! Error types for the cache
//!
//! Cache operations themselves never fail; errors only come from loading
//! configuration and encoding statistics.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A configuration value was present but could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Statistics could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
