//! Error types for the cache
//!
//! Cache primitives never fail; errors only come from configuration and
//! from the typed JSON helpers.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration rejected by `Config::validate`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A payload could not be encoded to or decoded from JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
