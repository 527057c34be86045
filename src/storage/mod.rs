//! Storage Module
//!
//! Namespaced, tag-indexed key/value storage over a pluggable shared backend.

mod backend;
mod memory;
mod servers;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use backend::Backend;
pub use memory::MemoryBackend;
pub use servers::{ServerDescriptor, ServerRegistry, DEFAULT_SERVER_WEIGHT};
pub use stats::BackendStats;
pub use store::{is_valid_entry_identifier, is_valid_tag, NamespacedStore};
