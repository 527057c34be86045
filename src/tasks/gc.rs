//! Garbage Collection Task
//!
//! Background task that periodically runs the store's garbage-collection hook.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::storage::{Backend, NamespacedStore};

/// Spawns a background task that calls [`NamespacedStore::collect_garbage`]
/// every `interval_secs` seconds.
///
/// Backends without their own expiry leave the hook as a no-op, so for them
/// the task only logs. Errors are logged and the loop keeps running.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store = Arc::new(NamespacedStore::new(Arc::new(MemoryBackend::new()), "session_"));
/// let gc_handle = spawn_gc_task(store.clone(), 60);
/// // Later, during shutdown:
/// gc_handle.abort();
/// ```
pub fn spawn_gc_task<B>(store: Arc<NamespacedStore<B>>, interval_secs: u64) -> JoinHandle<()>
where
    B: Backend + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting garbage collection task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match store.collect_garbage() {
                Ok(0) => debug!("Garbage collection: nothing to collect"),
                Ok(removed) => info!("Garbage collection: removed {} entries", removed),
                Err(err) => warn!("Garbage collection failed: {}", err),
            }
        }
    })
}
