//! Backend Statistics Module
//!
//! Tracks read and write traffic on the in-memory backend.

use serde::Serialize;

// == Backend Stats ==
/// Tracks backend traffic counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BackendStats {
    /// Number of reads that found a value
    pub hits: u64,
    /// Number of reads that found nothing
    pub misses: u64,
    /// Number of values written
    pub writes: u64,
    /// Number of keys actually deleted
    pub deletes: u64,
    /// Current number of keys in the backend
    pub total_entries: usize,
}

impl BackendStats {
    // == Constructor ==
    /// Creates a new BackendStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
