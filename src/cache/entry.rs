//! Cache Entry Module
//!
//! Defines a single cached upstream result and its freshness check.

use serde_json::Value;

// == Cache Entry ==
/// A normalized upstream result stored under one request key.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Serialized request parameters this entry answers
    pub key: String,
    /// Normalized JSON payload
    pub data: Value,
    /// When the upstream fetch completed (Unix milliseconds)
    pub fetched_at_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the given fetch time.
    pub fn new(key: impl Into<String>, data: Value, fetched_at_ms: u64) -> Self {
        Self {
            key: key.into(),
            data,
            fetched_at_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the fetch, saturating at zero if the clock
    /// reads earlier than the stamp.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.fetched_at_ms)
    }

    // == Is Fresh ==
    /// Checks whether the entry can still be served for `ttl_ms`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale, so a
    /// read at exactly `fetched_at + ttl` goes upstream.
    pub fn is_fresh(&self, ttl_ms: u64, now_ms: u64) -> bool {
        self.age_ms(now_ms) < ttl_ms
    }

    // == Time To Live ==
    /// Returns the remaining freshness window in milliseconds, 0 once stale.
    pub fn ttl_remaining_ms(&self, ttl_ms: u64, now_ms: u64) -> u64 {
        ttl_ms.saturating_sub(self.age_ms(now_ms))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("fixture:1", json!({"id": 1}), 1_000);

        assert_eq!(entry.key, "fixture:1");
        assert_eq!(entry.data["id"], 1);
        assert_eq!(entry.fetched_at_ms, 1_000);
    }

    #[test]
    fn test_entry_fresh_within_ttl() {
        let entry = CacheEntry::new("k", json!([]), 10_000);

        assert!(entry.is_fresh(60_000, 10_000));
        assert!(entry.is_fresh(60_000, 69_999));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("k", json!([]), 10_000);

        // now - fetched_at == ttl is a miss
        assert!(!entry.is_fresh(60_000, 70_000));
        assert!(!entry.is_fresh(60_000, 70_001));
    }

    #[test]
    fn test_clock_behind_stamp_counts_as_fresh() {
        let entry = CacheEntry::new("k", json!([]), 10_000);

        assert_eq!(entry.age_ms(5_000), 0);
        assert!(entry.is_fresh(60_000, 5_000));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("k", json!([]), 0);

        assert_eq!(entry.ttl_remaining_ms(60_000, 15_000), 45_000);
        assert_eq!(entry.ttl_remaining_ms(60_000, 90_000), 0);
    }
}
