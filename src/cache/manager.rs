//! Cache Manager Module
//!
//! Thread-safe, cloneable handle over a `CacheStore`. This is the object the
//! composition root builds once and hands to every caller.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock, DEFAULT_MAX_SIZE};
use crate::config::Config;
use crate::error::Result;

// == Namespace TTLs ==
/// Per-namespace TTL policy used by the convenience wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceTtls {
    pub page: Duration,
    pub api: Duration,
    pub route: Duration,
}

impl From<&Config> for NamespaceTtls {
    fn from(config: &Config) -> Self {
        Self {
            page: config.page_ttl,
            api: config.api_ttl,
            route: config.route_ttl,
        }
    }
}

// == Cache Manager ==
/// Bounded, expiring key-value cache shared across threads.
///
/// Every operation takes the single store lock for its whole duration, so
/// get/set/has/delete are atomic with respect to each other.
pub struct CacheManager<V = serde_json::Value> {
    store: Arc<Mutex<CacheStore<V>>>,
    ttls: NamespaceTtls,
}

impl<V> Clone for CacheManager<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ttls: self.ttls,
        }
    }
}

impl<V> fmt::Debug for CacheManager<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("len", &self.len())
            .field("ttls", &self.ttls)
            .finish()
    }
}

impl<V> Default for CacheManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheManager<V> {
    // == Constructors ==
    /// Creates a cache with the default configuration and the system clock.
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            store: Arc::new(Mutex::new(CacheStore::new(DEFAULT_MAX_SIZE, config.default_ttl))),
            ttls: NamespaceTtls::from(&config),
        }
    }

    /// Creates a cache from a validated configuration.
    pub fn with_config(config: &Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache from a validated configuration reading time from `clock`.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let store = CacheStore::with_clock(config.capacity()?, config.default_ttl, clock);

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            ttls: NamespaceTtls::from(config),
        })
    }

    // == Primitives ==
    /// Stores `value` under `key` with the default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.store.lock().set(key.into(), value, None);
    }

    /// Stores `value` under `key`, expiring after `ttl`.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.store.lock().set(key.into(), value, Some(ttl));
    }

    /// Returns the live value for `key`, purging it if expired.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.store.lock().get(key)
    }

    /// True iff `get(key)` would return a value right now.
    pub fn has(&self, key: &str) -> bool {
        self.store.lock().has(key)
    }

    /// Removes `key`, returning whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.store.lock().delete(key)
    }

    /// Empties the cache. Must be called when the signed-in identity changes.
    pub fn clear(&self) -> usize {
        self.store.lock().clear()
    }

    // == Maintenance ==
    /// Removes every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.store.lock().purge_expired()
    }

    // == Introspection ==
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.store.lock().ttl_remaining(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn max_size(&self) -> usize {
        self.store.lock().max_size().get()
    }

    pub fn ttls(&self) -> NamespaceTtls {
        self.ttls
    }
}
