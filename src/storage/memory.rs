//! In-Memory Backend Module
//!
//! Reference [`Backend`] implementation: a HashMap shared between threads.

use std::collections::HashMap;

use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;

use crate::error::Result;
use crate::storage::{Backend, BackendStats};

// == Memory State ==
#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, Value>,
    stats: BackendStats,
}

// == Memory Backend ==
/// Process-local backend holding every entry in a single map.
///
/// The map and the backend-wide lock are guarded separately: the map mutex is
/// held only for the duration of one operation, while the lock domain is held
/// for as long as a caller keeps its guard. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    domain: Mutex<()>,
}

impl MemoryBackend {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current traffic statistics.
    pub fn stats(&self) -> BackendStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of keys stored, across every namespace.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl Backend for MemoryBackend {
    type Guard<'a> = MutexGuard<'a, ()>;

    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut state = self.state.lock();
        let value = state.entries.get(key).cloned();
        if value.is_some() {
            state.stats.record_hit();
        } else {
            state.stats.record_miss();
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut state = self.state.lock();
        state.entries.insert(key.to_string(), value);
        state.stats.record_write();
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut state = self.state.lock();
        let existed = state.entries.remove(key).is_some();
        if existed {
            state.stats.record_delete();
        }
        Ok(existed)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().entries.keys().cloned().collect())
    }

    fn lock(&self) -> Result<Self::Guard<'_>> {
        Ok(self.domain.lock())
    }
}
