//! Cache Module
//!
//! Time-bounded in-memory cache of response payloads keyed by request URL.
//! Entries expire a fixed TTL after insertion and are swept by a background
//! reaper owned by each [`Cache`].

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
