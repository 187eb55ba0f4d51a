//! Cache Store Module
//!
//! The key/value map behind the shared [`Cache`](super::Cache) handle.
//! `CacheStore` itself does no locking; every caller reaches it through the
//! handle's mutex.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Response payloads keyed by request URL, expiring `ttl` after insertion.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and expiration counters
    stats: CacheStats,
    /// Expiration duration, fixed at construction
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`.
    ///
    /// Re-adding an existing key replaces its payload and restarts its TTL.
    pub fn add(&mut self, key: String, value: Bytes) {
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the payload stored under `key`, if any.
    ///
    /// A stale entry that the reaper has not reached yet is dropped here and
    /// reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        let stale = match self.entries.get(key) {
            Some(entry) if !entry.is_stale(self.ttl) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if stale {
            self.entries.remove(key);
            self.stats.record_expired(1);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Remove Stale ==
    /// Deletes every entry older than the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn remove_stale(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries currently held, stale or not.
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
    use tokio::time::advance;

    const TTL: Duration = Duration::from_millis(100);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.ttl(), TTL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_add_and_get() {
        let mut store = CacheStore::new(TTL);

        store.add("loc/1".to_string(), Bytes::from_static(b"payload"));

        assert_eq!(store.get("loc/1"), Some(Bytes::from_static(b"payload")));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_get_never_added() {
        let mut store = CacheStore::new(TTL);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_overwrite() {
        let mut store = CacheStore::new(TTL);

        store.add("key".to_string(), Bytes::from_static(b"v1"));
        store.add("key".to_string(), Bytes::from_static(b"v2"));

        assert_eq!(store.get("key"), Some(Bytes::from_static(b"v2")));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_get_drops_stale_entry() {
        let mut store = CacheStore::new(TTL);
        store.add("key".to_string(), Bytes::from_static(b"v"));

        advance(TTL + Duration::from_millis(1)).await;

        assert_eq!(store.get("key"), None);
        assert!(store.is_empty());
        assert_eq!(store.stats().expired, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_remove_stale() {
        let mut store = CacheStore::new(TTL);

        store.add("old".to_string(), Bytes::from_static(b"a"));
        advance(Duration::from_millis(60)).await;
        store.add("young".to_string(), Bytes::from_static(b"b"));
        advance(Duration::from_millis(60)).await;

        let removed = store.remove_stale();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("young"), Some(Bytes::from_static(b"b")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_re_add_restarts_ttl() {
        let mut store = CacheStore::new(TTL);

        store.add("key".to_string(), Bytes::from_static(b"v1"));
        advance(Duration::from_millis(60)).await;
        store.add("key".to_string(), Bytes::from_static(b"v2"));
        advance(Duration::from_millis(60)).await;

        assert_eq!(store.remove_stale(), 0);
        assert_eq!(store.get("key"), Some(Bytes::from_static(b"v2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_stats() {
        let mut store = CacheStore::new(TTL);

        store.add("key".to_string(), Bytes::from_static(b"v"));
        store.get("key"); // hit
        store.get("missing"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
