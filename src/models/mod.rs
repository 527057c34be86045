//! Request and Response models for the store API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AddServerRequest, SetRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, FlushResponse, GetResponse, HasResponse, HealthResponse,
    KeysResponse, ServersResponse, SetResponse, StatsResponse, TagResponse,
};
