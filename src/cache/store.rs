//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and lazy TTL expiration.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock};

// == Cache Store ==
/// Bounded cache storage with oldest-first eviction and per-entry TTL.
///
/// Expired entries are only removed when their exact key is read again, when
/// capacity pressure evicts them, or by an explicit `purge_expired`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order, oldest first
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries held after any `set`
    max_size: NonZeroUsize,
    /// TTL for entries stored without an explicit one
    default_ttl: Duration,
    /// Time source for timestamps and expiry checks
    clock: Arc<dyn Clock>,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    pub fn new(max_size: NonZeroUsize, default_ttl: Duration) -> Self {
        Self::with_clock(max_size, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(max_size: NonZeroUsize, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::with_capacity(max_size.get()),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_size,
            default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the cache already holds `max_size` entries, exactly one entry (the
    /// earliest inserted) is evicted first. An existing key is then
    /// overwritten as a brand new insertion: value, timestamp and TTL are
    /// replaced together and the key moves to the newest position.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses default_ttl if None)
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) {
        if self.entries.len() >= self.max_size.get() {
            self.evict_oldest();
        }

        let now = self.clock.now();
        let mut entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl), now);

        if let Some(previous) = self.entries.remove(&key) {
            self.order.remove(previous.seq);
        }
        entry.seq = self.order.record(&key);
        self.entries.insert(key, entry);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired. An expired entry is removed
    /// as a side effect and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = self.clock.now();
        if !self.retain_if_live(key, now) {
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Has ==
    /// Returns true iff `get` on the same key would return a value right now.
    ///
    /// Performs the same lazy purge as `get` but leaves hit/miss counters alone.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now();
        self.retain_if_live(key, now)
    }

    // == Delete ==
    /// Removes an entry by key, returning whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Empties the store, returning the number of entries dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);

        info!("Cache cleared: dropped {} entries", dropped);
        dropped
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }

        self.stats.record_expirations(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry, None if absent or expired.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.ttl_remaining(now))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> NonZeroUsize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Keeps `key` if it is live at `now`, purging it if expired.
    ///
    /// Returns whether a live entry remains.
    fn retain_if_live(&mut self, key: &str, now: Instant) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!("Purged expired entry: {}", key);
            return false;
        }

        true
    }

    fn evict_oldest(&mut self) {
        if let Some(evicted) = self.order.pop_oldest() {
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!("Evicted oldest entry to make room: {}", evicted);
        }
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.seq);
        Some(entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const DEFAULT_TTL: Duration = Duration::from_secs(300);

    fn store_with_clock(max_size: usize) -> (CacheStore<String>, ManualClock) {
        let clock = ManualClock::new();
        let store = CacheStore::with_clock(
            NonZeroUsize::new(max_size).unwrap(),
            DEFAULT_TTL,
            Arc::new(clock.clone()),
        );
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(NonZeroUsize::new(100).unwrap(), DEFAULT_TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_size().get(), 100);
        assert_eq!(store.default_ttl(), DEFAULT_TTL);
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), None);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _clock) = store_with_clock(100);
        assert_eq!(store.get("nonexistent"), None);
        assert!(!store.has("nonexistent"));
    }

    #[test]
    fn test_store_delete() {
        let (mut store, _clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), None);

        assert!(store.delete("key1"));
        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
        assert!(!store.delete("key1"));
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), Some(Duration::from_millis(1000)));
        clock.advance(Duration::from_millis(600));
        store.set("key1".to_string(), "value2".to_string(), Some(Duration::from_millis(1000)));

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);

        // TTL window restarts at the second set
        clock.advance(Duration::from_millis(600));
        assert_eq!(store.get("key1"), Some("value2".to_string()));
        clock.advance(Duration::from_millis(401));
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut store, clock) = store_with_clock(100);

        store.set("k".to_string(), "v".to_string(), Some(Duration::from_millis(100)));

        clock.advance(Duration::from_millis(50));
        assert_eq!(store.get("k"), Some("v".to_string()));

        clock.advance(Duration::from_millis(51));
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty(), "expired entry is purged by the read");
    }

    #[test]
    fn test_store_default_ttl_applies() {
        let (mut store, clock) = store_with_clock(100);

        store.set("k".to_string(), "v".to_string(), None);
        assert_eq!(store.ttl_remaining("k"), Some(DEFAULT_TTL));

        clock.advance(DEFAULT_TTL);
        assert!(store.has("k"));
        clock.advance(Duration::from_millis(1));
        assert!(!store.has("k"));
    }

    #[test]
    fn test_expired_entries_linger_until_accessed() {
        let (mut store, clock) = store_with_clock(100);

        store.set("a".to_string(), "1".to_string(), Some(Duration::from_millis(10)));
        store.set("b".to_string(), "2".to_string(), Some(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(20));

        // Nothing sweeps in the background
        assert_eq!(store.len(), 2);

        assert!(!store.has("a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_fifo_eviction() {
        let (mut store, _clock) = store_with_clock(2);

        store.set("a".to_string(), "1".to_string(), None);
        store.set("b".to_string(), "2".to_string(), None);
        store.set("c".to_string(), "3".to_string(), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some("2".to_string()));
        assert_eq!(store.get("c"), Some("3".to_string()));
    }

    #[test]
    fn test_reads_do_not_protect_from_eviction() {
        let (mut store, _clock) = store_with_clock(3);

        store.set("key1".to_string(), "value1".to_string(), None);
        store.set("key2".to_string(), "value2".to_string(), None);
        store.set("key3".to_string(), "value3".to_string(), None);

        // Frequent reads of key1 do not move it
        for _ in 0..5 {
            assert!(store.get("key1").is_some());
        }

        store.set("key4".to_string(), "value4".to_string(), None);

        assert_eq!(store.get("key1"), None);
        assert!(store.has("key2"));
    }

    #[test]
    fn test_overwrite_moves_key_to_newest() {
        let (mut store, _clock) = store_with_clock(3);

        store.set("key1".to_string(), "value1".to_string(), None);
        store.set("key2".to_string(), "value2".to_string(), None);
        store.set("key1".to_string(), "value1b".to_string(), None);
        store.set("key3".to_string(), "value3".to_string(), None);

        // key2 is now the oldest insertion
        store.set("key4".to_string(), "value4".to_string(), None);

        assert!(!store.has("key2"));
        assert_eq!(store.get("key1"), Some("value1b".to_string()));
    }

    #[test]
    fn test_overwrite_when_full_still_evicts_one() {
        let (mut store, _clock) = store_with_clock(2);

        store.set("a".to_string(), "1".to_string(), None);
        store.set("b".to_string(), "2".to_string(), None);
        store.set("b".to_string(), "3".to_string(), None);

        assert_eq!(store.len(), 1);
        assert!(!store.has("a"));
        assert_eq!(store.get("b"), Some("3".to_string()));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_capacity_pressure_reclaims_expired_slot() {
        let (mut store, clock) = store_with_clock(2);

        store.set("old".to_string(), "1".to_string(), Some(Duration::from_millis(10)));
        store.set("live".to_string(), "2".to_string(), None);
        clock.advance(Duration::from_millis(20));

        store.set("new".to_string(), "3".to_string(), None);

        assert_eq!(store.len(), 2);
        assert!(store.has("live"));
        assert!(store.has("new"));
    }

    #[test]
    fn test_store_clear() {
        let (mut store, _clock) = store_with_clock(10);

        store.set("a".to_string(), "1".to_string(), None);
        store.set("b".to_string(), "2".to_string(), None);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert!(!store.has("a"));

        // Eviction order restarts cleanly after a clear
        store.set("c".to_string(), "3".to_string(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_stats() {
        let (mut store, clock) = store_with_clock(1);

        store.set("key1".to_string(), "value1".to_string(), Some(Duration::from_millis(5)));
        store.get("key1"); // hit
        store.get("nonexistent"); // miss
        store.has("key1"); // not counted

        clock.advance(Duration::from_millis(10));
        store.get("key1"); // expired: miss

        store.set("key2".to_string(), "value2".to_string(), None);
        store.set("key3".to_string(), "value3".to_string(), None); // evicts key2

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_purge_expired() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), Some(Duration::from_secs(1)));
        store.set("key2".to_string(), "value2".to_string(), Some(Duration::from_secs(10)));

        clock.advance(Duration::from_millis(1100));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.has("key2"));
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_accepts_empty_key() {
        let (mut store, _clock) = store_with_clock(10);

        store.set(String::new(), "value".to_string(), None);
        assert_eq!(store.get(""), Some("value".to_string()));
    }

    #[test]
    fn test_cached_none_is_not_absent() {
        let clock = ManualClock::new();
        let mut store: CacheStore<Option<u32>> = CacheStore::with_clock(
            NonZeroUsize::new(10).unwrap(),
            DEFAULT_TTL,
            Arc::new(clock),
        );

        store.set("empty".to_string(), None, None);

        assert!(store.has("empty"));
        assert_eq!(store.get("empty"), Some(None));
    }
}
