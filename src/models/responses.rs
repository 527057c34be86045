//! Response DTOs for the store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::storage::{BackendStats, ServerDescriptor};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the existence check (GET /has/:key)
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub key: String,
    pub exists: bool,
}

impl HasResponse {
    pub fn new(key: impl Into<String>, exists: bool) -> Self {
        Self {
            key: key.into(),
            exists,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// Tags the entry was added to
    pub tags: Vec<String>,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, tags: Vec<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            tags,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for tag lookups (GET /tag/:tag)
#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub tag: String,
    /// Namespaced keys carrying the tag
    pub keys: Vec<String>,
}

impl TagResponse {
    pub fn new(tag: impl Into<String>, keys: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            keys,
        }
    }
}

/// Response body for flushes (DELETE /tag/:tag, POST /flush)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl FlushResponse {
    pub fn new(target: &str, removed: usize) -> Self {
        Self {
            message: format!("Flushed {} entries from '{}'", removed, target),
            removed,
        }
    }
}

/// Response body for the key listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub identifier: String,
    pub keys: Vec<String>,
}

/// Response body for the server list (GET /servers, POST /servers)
#[derive(Debug, Clone, Serialize)]
pub struct ServersResponse {
    pub servers: Vec<ServerDescriptor>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub deletes: u64,
    /// Keys in the backend across every namespace
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<BackendStats> for StatsResponse {
    fn from(stats: BackendStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            deletes: stats.deletes,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
