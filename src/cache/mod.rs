//! Cache Module
//!
//! Provides a bounded in-memory cache with per-entry TTL and oldest-first eviction.

mod clock;
mod entry;
mod json;
mod manager;
mod namespace;
mod order;
mod stats;
mod store;


use std::num::NonZeroUsize;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use manager::{CacheManager, NamespaceTtls};
pub use namespace::Namespace;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Capacity of a cache built without explicit configuration
pub const DEFAULT_MAX_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => panic!("default capacity must be non-zero"),
};
