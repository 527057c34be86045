//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Garbage collection: runs the store's expiry hook at a configured interval

mod gc;

pub use gc::spawn_gc_task;
