//! Tagged Store - A namespaced, tag-indexed key/value store
//!
//! Isolates several logical stores inside one shared, lockable backend and
//! supports bulk invalidation of entries through tags.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, StoreError};
pub use storage::{Backend, MemoryBackend, NamespacedStore, ServerDescriptor};
pub use tasks::spawn_gc_task;
