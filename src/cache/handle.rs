//! Shared Cache Handle
//!
//! Wraps a [`CacheStore`] in a single exclusive lock and owns the reaper
//! that sweeps it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::spawn_reaper;

// == Cache ==
/// Time-bounded response cache keyed by request URL.
///
/// Clones share one map and one reaper. `add`, `get` and the reaper's sweep
/// all take the same mutex for their entire map access. Dropping every clone
/// also stops the reaper, but only [`Cache::shutdown`] waits for it.
#[derive(Clone)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    reaper: Arc<Reaper>,
}

/// Stop signal and join handle for the background sweep.
struct Reaper {
    stop: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    /// Set once an unexpected reaper exit has been logged
    failure_reported: AtomicBool,
}

impl Reaper {
    /// True while the sweep task is still running.
    fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Logs, once, a reaper that exited without being asked to.
    fn report_if_dead(&self) {
        if *self.stop.borrow() || self.failure_reported.load(Ordering::Relaxed) {
            return;
        }
        if self.is_running() {
            return;
        }
        if !self.failure_reported.swap(true, Ordering::Relaxed) {
            error!("Cache reaper stopped unexpectedly; stale entries now expire only on lookup");
        }
    }
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// Entries expire `ttl` after insertion; the reaper sweeps every `ttl`.
    /// Must be called from within a tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (stop, stop_rx) = watch::channel(false);
        let handle = spawn_reaper(Arc::clone(&store), ttl, stop_rx);

        info!("Cache created with ttl of {:?}", ttl);

        Self::from_parts(store, stop, handle)
    }

    fn from_parts(
        store: Arc<Mutex<CacheStore>>,
        stop: watch::Sender<bool>,
        handle: JoinHandle<()>,
    ) -> Self {
        Self {
            store,
            reaper: Arc::new(Reaper {
                stop,
                handle: Mutex::new(Some(handle)),
                failure_reported: AtomicBool::new(false),
            }),
        }
    }

    // == Add ==
    /// Inserts or overwrites `key`, restarting its TTL.
    pub fn add(&self, key: impl Into<String>, value: Bytes) {
        let key = key.into();
        debug!(key = %key, bytes = value.len(), "cache add");
        self.store.lock().add(key, value);
        self.reaper.report_if_dead();
    }

    // == Get ==
    /// Returns the payload cached under `key`, or `None` on a miss.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let value = self.store.lock().get(key);
        debug!(key = %key, hit = value.is_some(), "cache get");
        self.reaper.report_if_dead();
        value
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Whether the background sweep is still running.
    ///
    /// False after [`Cache::shutdown`] or if the reaper died.
    pub fn reaper_running(&self) -> bool {
        self.reaper.is_running()
    }

    /// Number of entries held, including stale ones not yet swept.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Only the first call across all clones joins the task; later calls
    /// return `Ok(())` immediately. A reaper that panicked is reported as
    /// [`PokedexError::ReaperFailed`].
    pub async fn shutdown(self) -> Result<()> {
        let Some(handle) = self.reaper.handle.lock().take() else {
            return Ok(());
        };

        // The receiver is gone if the task already died; the join below
        // reports why.
        let _ = self.reaper.stop.send(true);

        match handle.await {
            Ok(()) => {
                info!("Cache reaper stopped");
                Ok(())
            }
            Err(e) => {
                error!("Cache reaper failed: {}", e);
                Err(PokedexError::ReaperFailed(e.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("store", &*self.store.lock())
            .finish()
    }
}
