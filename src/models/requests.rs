//! Request DTOs for the store API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::storage::{is_valid_entry_identifier, is_valid_tag, DEFAULT_SERVER_WEIGHT};

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The local key to store the value under
/// - `value`: Any JSON value
/// - `tags`: Tags to add the entry to
/// - `lifetime`: Accepted and ignored; entries do not expire
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub lifetime: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !is_valid_entry_identifier(&self.key) {
            return Some(format!(
                "Invalid key '{}': only letters, digits and underscores are allowed",
                self.key
            ));
        }
        if let Some(tag) = self.tags.iter().find(|tag| !is_valid_tag(tag)) {
            return Some(format!(
                "Invalid tag '{}': only letters, digits and underscores are allowed",
                tag
            ));
        }
        None
    }
}

/// Request body for registering a server (POST /servers)
#[derive(Debug, Clone, Deserialize)]
pub struct AddServerRequest {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    DEFAULT_SERVER_WEIGHT
}

impl AddServerRequest {
    pub fn validate(&self) -> Option<String> {
        if self.host.trim().is_empty() {
            return Some("Host cannot be empty".to_string());
        }
        None
    }
}
