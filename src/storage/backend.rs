//! Backend Module
//!
//! Defines the capability set a [`NamespacedStore`](super::NamespacedStore)
//! needs from the container it writes into.

use serde_json::Value;

use crate::error::Result;

// == Backend Trait ==
/// A shared, thread-safe associative container with one coarse lock domain.
///
/// Every method is atomic with respect to a single key. The lock returned by
/// [`Backend::lock`] is independent of the container's own synchronization,
/// so `get`/`set`/`delete` may be called while a guard is held. Dropping the
/// guard releases the lock.
///
/// Methods return `Result` so that network-backed implementations can report
/// [`StoreError::BackendUnavailable`](crate::error::StoreError::BackendUnavailable).
pub trait Backend: Send + Sync {
    /// Guard for the backend-wide lock; unlocks on drop.
    type Guard<'a>
    where
        Self: 'a;

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Removes `key`. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Returns a snapshot of every key currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Acquires the backend-wide lock, blocking until it is available.
    fn lock(&self) -> Result<Self::Guard<'_>>;

    // == Garbage Collection Hook ==
    /// Optional expiry hook. Backends whose expiry is handled out of process
    /// keep this default, which does nothing and reports zero entries removed.
    fn collect_garbage(&self) -> Result<usize> {
        Ok(0)
    }
}
