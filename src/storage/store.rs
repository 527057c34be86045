//! Namespaced Store Module
//!
//! Public storage contract: namespaced keys, tag indexes and bulk flushes on
//! top of any [`Backend`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::storage::{Backend, ServerDescriptor, ServerRegistry};

// == Validation ==
/// Returns true if `identifier` is non-empty and made only of ASCII letters,
/// digits and underscores.
///
/// The store never calls this itself; callers are expected to check keys
/// before using them.
pub fn is_valid_entry_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Tags follow the same rules as entry identifiers.
pub fn is_valid_tag(tag: &str) -> bool {
    is_valid_entry_identifier(tag)
}

/// Reads a tag index value. Anything other than an array of strings is not
/// a tag index.
fn tag_index(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(key) => Some(key),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

// == Namespaced Store ==
/// Key/value store isolated under an identifier prefix inside a shared backend.
///
/// Every local key `k` is stored as `identifier + k`. Tags live in the same
/// key space: the index for tag `t` is stored under `identifier + t` as a
/// JSON array of the namespaced keys carrying it.
///
/// Stores are cheap to share behind an `Arc`; all mutable state lives in the
/// backend, apart from the server registry.
#[derive(Debug)]
pub struct NamespacedStore<B> {
    /// Shared backend
    backend: Arc<B>,
    /// Prefix owned by this store
    identifier: String,
    /// Informational server list
    servers: ServerRegistry,
}

impl<B: Backend> NamespacedStore<B> {
    // == Constructor ==
    /// Creates a store over `backend` owning the `identifier` namespace.
    ///
    /// Existing entries under the identifier are left in place; call
    /// [`flush`](Self::flush) for a clean namespace. An empty identifier owns
    /// the whole backend.
    ///
    /// Keys are plain `identifier + key` concatenations, so an identifier
    /// that is a prefix of another (`sess` and `sess_admin`) also owns the
    /// other's keys when flushing. Identifiers ending in `_` avoid this as
    /// long as no other identifier extends them.
    pub fn new(backend: Arc<B>, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        if !identifier.is_empty() && !identifier.ends_with('_') {
            warn!(
                identifier = %identifier,
                "Identifier does not end with '_'; flush may reach namespaces it prefixes"
            );
        }

        Self {
            backend,
            identifier,
            servers: ServerRegistry::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the backend this store writes into.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Maps a local key or tag to the key used in the backend.
    pub fn namespaced_key(&self, key: &str) -> String {
        format!("{}{}", self.identifier, key)
    }

    // == Set ==
    /// Stores `value` under `key` and adds the entry to each tag's index.
    ///
    /// The data write and each tag index update are separate critical
    /// sections. Each tag update holds the backend lock across the whole
    /// read-append-write, so concurrent writers tagging the same tag never
    /// drop each other's keys.
    ///
    /// `lifetime` (seconds) is accepted for interface compatibility and
    /// ignored: entries never expire on their own.
    pub fn set(&self, key: &str, value: Value, tags: &[&str], lifetime: Option<u64>) -> Result<()> {
        let cache_key = self.namespaced_key(key);

        if let Some(seconds) = lifetime {
            trace!(key = %cache_key, seconds, "Ignoring entry lifetime");
        }

        {
            let _guard = self.backend.lock()?;
            self.backend.set(&cache_key, value)?;
        }
        debug!(key = %cache_key, "Stored entry");

        for tag in tags {
            self.tag_entry(tag, &cache_key)?;
        }

        Ok(())
    }

    fn tag_entry(&self, tag: &str, cache_key: &str) -> Result<()> {
        let tag_key = self.namespaced_key(tag);

        let _guard = self.backend.lock()?;
        let mut tagged = self
            .backend
            .get(&tag_key)?
            .and_then(tag_index)
            .unwrap_or_default();

        if tagged.iter().any(|k| k == cache_key) {
            return Ok(());
        }

        tagged.push(cache_key.to_string());
        self.backend.set(&tag_key, Value::from(tagged))?;
        debug!(tag = %tag_key, key = %cache_key, "Tagged entry");
        Ok(())
    }

    // == Get ==
    /// Returns the value stored under `key`, or `None`.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.backend.get(&self.namespaced_key(key))
    }

    pub fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    // == Remove ==
    /// Deletes `key`. Returns whether it existed.
    ///
    /// Tag indexes that reference the key are left untouched and keep a
    /// stale reference until the tag is flushed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.remove_namespaced(&self.namespaced_key(key))
    }

    fn remove_namespaced(&self, cache_key: &str) -> Result<bool> {
        let _guard = self.backend.lock()?;
        let existed = self.backend.delete(cache_key)?;
        if existed {
            debug!(key = %cache_key, "Removed entry");
        }
        Ok(existed)
    }

    // == Tags ==
    /// Returns the namespaced keys carrying `tag`, or `None` if it was never
    /// used (or has been flushed).
    pub fn get_by_tag(&self, tag: &str) -> Result<Option<Vec<String>>> {
        Ok(self.get(tag)?.and_then(tag_index))
    }

    /// Removes every entry carrying `tag`, then the tag index itself.
    ///
    /// Runs as a single critical section so no entry can be tagged between
    /// reading the index and deleting it. Returns the number of entries
    /// removed; keys already gone are not counted.
    ///
    /// Index entries outside this namespace are skipped: any local value
    /// holding an array of strings reads as a tag index.
    pub fn flush_by_tag(&self, tag: &str) -> Result<usize> {
        let tag_key = self.namespaced_key(tag);

        let _guard = self.backend.lock()?;
        let Some(tagged) = self.backend.get(&tag_key)?.and_then(tag_index) else {
            return Ok(0);
        };

        let mut removed = 0;
        for cache_key in &tagged {
            if !cache_key.starts_with(&self.identifier) {
                warn!(tag = %tag_key, key = %cache_key, "Skipping key outside namespace");
                continue;
            }
            if self.backend.delete(cache_key)? {
                removed += 1;
            }
        }
        self.backend.delete(&tag_key)?;

        info!(tag = %tag_key, removed, "Flushed tag");
        Ok(removed)
    }

    pub fn is_valid_entry_identifier(&self, identifier: &str) -> bool {
        is_valid_entry_identifier(identifier)
    }

    pub fn is_valid_tag(&self, tag: &str) -> bool {
        is_valid_tag(tag)
    }

    // == Flush ==
    /// Removes every backend key that starts with this store's identifier,
    /// tag indexes included. Namespaces whose identifier merely extends this
    /// one are matched too; see [`new`](Self::new).
    ///
    /// Works from a snapshot of the backend keys; entries written after the
    /// snapshot survive. Returns the number of keys removed.
    pub fn flush(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.backend.keys()? {
            if key.starts_with(&self.identifier) && self.remove_namespaced(&key)? {
                removed += 1;
            }
        }

        info!(identifier = %self.identifier, removed, "Flushed namespace");
        Ok(removed)
    }

    /// Returns the local keys of this namespace, tag indexes included.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.identifier).map(str::to_string))
            .collect())
    }

    // == Servers ==
    pub fn add_server(&self, host: impl Into<String>, port: u16, weight: u32) {
        self.servers.add(ServerDescriptor::new(host, port, weight));
    }

    pub fn servers(&self) -> Vec<ServerDescriptor> {
        self.servers.list()
    }

    // == Garbage Collection ==
    /// Runs the backend's expiry hook, if it has one. Returns the number of
    /// entries it reports removed.
    pub fn collect_garbage(&self) -> Result<usize> {
        self.backend.collect_garbage()
    }
}
