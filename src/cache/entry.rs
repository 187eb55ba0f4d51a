//! Cache Entry Module
//!
//! Defines a single cached response payload and its insertion time.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// One cached response body plus the instant it was inserted.
///
/// Entries are never mutated; re-adding a key replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached payload
    pub value: Bytes,
    /// Insertion instant (monotonic)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was inserted.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// fresh. Only an age strictly greater than `ttl` is stale.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation() {
        let entry = CacheEntry::new(Bytes::from_static(b"payload"));

        assert_eq!(entry.value, Bytes::from_static(b"payload"));
        assert_eq!(entry.age(), Duration::ZERO);
        assert!(!entry.is_stale(Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_goes_stale_after_ttl() {
        let entry = CacheEntry::new(Bytes::from_static(b"payload"));

        tokio::time::advance(Duration::from_millis(99)).await;
        assert!(!entry.is_stale(Duration::from_millis(100)));

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(entry.is_stale(Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_boundary_condition() {
        let entry = CacheEntry::new(Bytes::from_static(b"payload"));

        // Age == ttl is not yet stale
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(!entry.is_stale(Duration::from_millis(100)));
    }
}
