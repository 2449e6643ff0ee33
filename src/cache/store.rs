//! Cache Store Module
//!
//! Keyed storage of normalized upstream results with per-lookup TTL checks.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Process-lifetime cache of normalized upstream results.
///
/// Entries are never removed. A stale entry stays in place until the next
/// successful fetch for its key overwrites it.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// One entry per request key
    entries: HashMap<String, CacheEntry>,
    /// Lookup statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookup ==
    /// Returns the cached payload for `key` if it is younger than `ttl_ms`.
    ///
    /// Absent and stale entries both count as misses.
    pub fn lookup(&mut self, key: &str, ttl_ms: u64, now_ms: u64) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(ttl_ms, now_ms) => {
                self.stats.record_hit();
                Some(entry.data.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a freshly fetched payload, replacing whatever the key held.
    ///
    /// Concurrent refreshes of one key are not serialized: the last insert
    /// to complete wins.
    pub fn insert(&mut self, key: impl Into<String>, data: Value, now_ms: u64) {
        let key = key.into();
        let entry = CacheEntry::new(key.clone(), data, now_ms);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Entry ==
    /// Returns the raw entry for inspection, fresh or not.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TTL: u64 = 60_000;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_insert_and_lookup() {
        let mut store = CacheStore::new();

        store.insert("matches:2024-05-01:307", json!([{"id": 1}]), 1_000);
        let value = store.lookup("matches:2024-05-01:307", TTL, 2_000);

        assert_eq!(value, Some(json!([{"id": 1}])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lookup_absent_is_miss() {
        let mut store = CacheStore::new();

        assert!(store.lookup("nothing", TTL, 0).is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_stale_entry_is_miss_but_kept() {
        let mut store = CacheStore::new();
        store.insert("k", json!(1), 0);

        assert!(store.lookup("k", TTL, TTL).is_none());
        // stale entries are never removed, only overwritten
        assert!(store.entry("k").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_window() {
        let mut store = CacheStore::new();

        store.insert("k", json!("old"), 0);
        store.insert("k", json!("new"), 70_000);

        assert_eq!(store.lookup("k", TTL, 100_000), Some(json!("new")));
        assert_eq!(store.entry("k").map(|e| e.fetched_at_ms), Some(70_000));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_last_write_wins() {
        let mut store = CacheStore::new();

        // a slower refresh completing after a faster one still wins
        store.insert("k", json!("fast"), 5_000);
        store.insert("k", json!("slow"), 4_000);

        assert_eq!(store.entry("k").map(|e| e.data.clone()), Some(json!("slow")));
    }

    #[test]
    fn test_store_keys_are_independent() {
        let mut store = CacheStore::new();

        store.insert("standings:307:2024", json!(["a"]), 0);
        store.insert("standings:39:2024", json!(["b"]), 600_000);

        let ttl = 900_000;
        assert!(store.lookup("standings:307:2024", ttl, 900_000).is_none());
        assert!(store.lookup("standings:39:2024", ttl, 900_000).is_some());
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.insert("k", json!(1), 0);
        store.lookup("k", TTL, 1); // hit
        store.lookup("other", TTL, 1); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
