//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant the entry was inserted or last overwritten
    pub created_at: Instant,
    /// How long the entry stays live after `created_at`
    pub ttl: Duration,
    /// Position in insertion order
    pub(crate) seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now`.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
            ttl,
            seq: 0,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stamped.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is still live when its age equals its TTL
    /// exactly, and expired only once the age is strictly greater.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.age(now) > self.ttl
    }

    // == Time To Live ==
    /// Returns remaining lifetime, or zero once the TTL has elapsed.
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.ttl.saturating_sub(self.age(now))
    }
}
