//! Server Registry Module
//!
//! Bookkeeping for the remote endpoints a store is nominally bound to.
//! Nothing in the store consults this list.

use std::fmt;
use std::str::FromStr;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Weight given to descriptors that do not specify one.
pub const DEFAULT_SERVER_WEIGHT: u32 = 1;

// == Server Descriptor ==
/// A remote endpoint, e.g. a memcached node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub host: String,
    pub port: u16,
    pub weight: u32,
}

impl ServerDescriptor {
    pub fn new(host: impl Into<String>, port: u16, weight: u32) -> Self {
        Self {
            host: host.into(),
            port,
            weight,
        }
    }
}

impl fmt::Display for ServerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.host, self.port, self.weight)
    }
}

/// Parses `host:port` or `host:port:weight`.
impl FromStr for ServerDescriptor {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidRequest(format!("Invalid server descriptor: '{}'", s));

        let mut parts = s.trim().split(':');
        let host = parts.next().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
        let port = parts
            .next()
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(invalid)?;
        let weight = match parts.next() {
            Some(w) => w.parse::<u32>().map_err(|_| invalid())?,
            None => DEFAULT_SERVER_WEIGHT,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(host, port, weight))
    }
}

// == Server Registry ==
/// Ordered list of server descriptors, in insertion order.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    servers: RwLock<Vec<ServerDescriptor>>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor. Duplicates are kept.
    pub fn add(&self, server: ServerDescriptor) {
        self.servers.write().push(server);
    }

    pub fn list(&self) -> Vec<ServerDescriptor> {
        self.servers.read().clone()
    }

    pub fn len(&self) -> usize {
        self.servers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_preserves_order() {
        let registry = ServerRegistry::new();
        registry.add(ServerDescriptor::new("cache-a", 11211, 2));
        registry.add(ServerDescriptor::new("cache-b", 11212, 1));

        let servers = registry.list();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].host, "cache-a");
        assert_eq!(servers[1].port, 11212);
    }

    #[test]
    fn test_registry_keeps_duplicates() {
        let registry = ServerRegistry::new();
        registry.add(ServerDescriptor::new("localhost", 11211, 1));
        registry.add(ServerDescriptor::new("localhost", 11211, 1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_parse_with_weight() {
        let server: ServerDescriptor = "127.0.0.1:11211:5".parse().unwrap();
        assert_eq!(server, ServerDescriptor::new("127.0.0.1", 11211, 5));
    }

    #[test]
    fn test_parse_default_weight() {
        let server: ServerDescriptor = " localhost:11211 ".parse().unwrap();
        assert_eq!(server.weight, DEFAULT_SERVER_WEIGHT);
        assert_eq!(server.to_string(), "localhost:11211:1");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "localhost", ":11211", "host:notaport", "host:1:x", "h:1:1:1"] {
            assert!(
                matches!(
                    input.parse::<ServerDescriptor>(),
                    Err(StoreError::InvalidRequest(_))
                ),
                "'{}' should be rejected",
                input
            );
        }
    }
}
