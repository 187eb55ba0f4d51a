//! Cache Reaper Task
//!
//! Background task that periodically removes stale cache entries.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::cache::CacheStore;

/// Shortest sweep period; a zero period would make the ticker panic.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawns the sweep task for one cache store.
///
/// Every `period` the task takes the store's lock, drops entries older than
/// the store's TTL and releases the lock. The lock is held for a single
/// sweep pass only.
///
/// A sweep pass that panics is logged at `error` level and retried on the
/// next tick. The task exits when `stop` receives `true` or when its sender
/// is dropped.
///
/// # Arguments
/// * `store` - The shared store to sweep
/// * `period` - Interval between sweeps (the cache uses its TTL)
/// * `stop` - Shutdown signal, checked on every tick
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let period = period.max(MIN_PERIOD);

    tokio::spawn(async move {
        info!("Starting cache reaper with period of {:?}", period);

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick fires immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let swept = guarded_sweep(|| {
                        let mut guard = store.lock();
                        let removed = guard.remove_stale();
                        (removed, guard.len())
                    });

                    if let Some((removed, remaining)) = swept {
                        if removed > 0 {
                            debug!("Reaper: removed {} stale entries, {} remain", removed, remaining);
                        }
                    }
                }
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Cache reaper exiting");
    })
}

/// Runs one sweep pass, logging instead of unwinding if it panics.
///
/// Returns `(removed, remaining)` on success. The store's lock does not
/// poison, so the next pass starts from a usable map.
fn guarded_sweep<F>(sweep: F) -> Option<(usize, usize)>
where
    F: FnOnce() -> (usize, usize),
{
    match panic::catch_unwind(AssertUnwindSafe(sweep)) {
        Ok(counts) => Some(counts),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("Reaper: sweep pass panicked ({}), retrying next tick", reason);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tokio::time::sleep;

    const TTL: Duration = Duration::from_millis(100);

    fn shared_store() -> Arc<Mutex<CacheStore>> {
        Arc::new(Mutex::new(CacheStore::new(TTL)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_stale_entries() {
        let store = shared_store();
        store
            .lock()
            .add("expire_soon".to_string(), Bytes::from_static(b"v"));

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), TTL, stop_rx);

        sleep(Duration::from_millis(250)).await;
        assert!(store.lock().is_empty(), "Stale entry should have been reaped");

        stop_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_preserves_fresh_entries() {
        let store = shared_store();

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), TTL, stop_rx);

        sleep(Duration::from_millis(150)).await;
        store
            .lock()
            .add("fresh".to_string(), Bytes::from_static(b"v"));

        // One sweep at t=200ms sees an entry aged 50ms
        sleep(Duration::from_millis(80)).await;
        assert_eq!(store.lock().len(), 1, "Fresh entry should not be removed");

        stop_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[test]
    fn test_guarded_sweep_returns_counts() {
        assert_eq!(guarded_sweep(|| (2, 5)), Some((2, 5)));
    }

    #[test]
    fn test_guarded_sweep_contains_panic() {
        let swept = guarded_sweep(|| -> (usize, usize) { panic!("sweep exploded") });
        assert_eq!(swept, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_on_signal() {
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = spawn_reaper(shared_store(), TTL, stop_rx);

        stop_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_when_sender_dropped() {
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = spawn_reaper(shared_store(), TTL, stop_rx);

        drop(stop_tx);
        handle.await.unwrap();
    }
}
