//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use tracing::warn;

use crate::storage::ServerDescriptor;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prefix of the served store
    pub identifier: String,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between garbage collection hook runs
    pub gc_interval: u64,
    /// Remote servers recorded in the store's server list
    pub servers: Vec<ServerDescriptor>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_IDENTIFIER` - Namespace prefix (default: "session_")
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `GC_INTERVAL` - Garbage collection interval in seconds (default: 60)
    /// - `STORE_SERVERS` - Comma-separated `host:port[:weight]` list (default: empty)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            identifier: env::var("STORE_IDENTIFIER").unwrap_or(defaults.identifier),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            gc_interval: env::var("GC_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.gc_interval),
            servers: env::var("STORE_SERVERS")
                .map(|v| parse_servers(&v))
                .unwrap_or_default(),
        }
    }
}

/// Parses a comma-separated server list, skipping malformed entries.
pub fn parse_servers(list: &str) -> Vec<ServerDescriptor> {
    list.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(|entry| match entry.parse::<ServerDescriptor>() {
            Ok(server) => Some(server),
            Err(err) => {
                warn!("Skipping server entry: {}", err);
                None
            }
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identifier: "session_".to_string(),
            server_port: 3000,
            gc_interval: 60,
            servers: Vec::new(),
        }
    }
}
