//! Insertion Order Module
//!
//! Tracks the order in which keys were written, for oldest-first eviction.

use std::collections::BTreeMap;

// == Insertion Order ==
/// Insertion-ordered key index.
///
/// Every write hands out a fresh, strictly increasing sequence number, so the
/// first entry of the map is always the oldest live insertion. Reads never
/// touch this structure.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    /// Keys by insertion sequence
    order: BTreeMap<u64, String>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty insertion index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Appends a key as the newest insertion and returns its sequence number.
    ///
    /// Callers must `remove` any previous sequence of the same key first.
    pub fn record(&mut self, key: &str) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.to_string());
        seq
    }

    // == Remove ==
    /// Forgets the insertion with the given sequence number.
    pub fn remove(&mut self, seq: u64) -> Option<String> {
        self.order.remove(&seq)
    }

    // == Pop Oldest ==
    /// Returns and removes the earliest inserted key.
    ///
    /// Returns None if the index is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    /// Returns the earliest inserted key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.values().map(String::as_str)
    }
}
