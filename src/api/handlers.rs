//! API Handlers
//!
//! HTTP request handlers for each store endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Result, StoreError};
use crate::models::{
    AddServerRequest, DeleteResponse, FlushResponse, GetResponse, HasResponse, HealthResponse,
    KeysResponse, ServersResponse, SetRequest, SetResponse, StatsResponse, TagResponse,
};
use crate::storage::{MemoryBackend, NamespacedStore};

/// Application state shared across all handlers.
///
/// The store is internally synchronized, so it is shared through a plain Arc.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<NamespacedStore<MemoryBackend>>,
}

impl AppState {
    pub fn new(store: NamespacedStore<MemoryBackend>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds a fresh memory backend, the store over it and its server list.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let store = NamespacedStore::new(Arc::new(MemoryBackend::new()), config.identifier.clone());
        for server in &config.servers {
            store.add_server(server.host.clone(), server.port, server.weight);
        }
        Self::new(store)
    }
}

/// Handler for PUT /set
///
/// Stores a value, optionally tagged. Keys and tags are validated first.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let tags: Vec<&str> = req.tags.iter().map(String::as_str).collect();
    state.store.set(&req.key, req.value, &tags, req.lifetime)?;

    Ok(Json(SetResponse::new(req.key, req.tags)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.store.get(&key)? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(StoreError::NotFound(key)),
    }
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    let exists = state.store.has(&key)?;
    Ok(Json(HasResponse::new(key, exists)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.store.remove(&key)? {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(StoreError::NotFound(key))
    }
}

/// Handler for GET /tag/:tag
pub async fn get_tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<TagResponse>> {
    match state.store.get_by_tag(&tag)? {
        Some(keys) => Ok(Json(TagResponse::new(tag, keys))),
        None => Err(StoreError::NotFound(format!("tag {}", tag))),
    }
}

/// Handler for DELETE /tag/:tag
///
/// Removes every entry carrying the tag. Unknown tags flush nothing.
pub async fn flush_tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<FlushResponse>> {
    let removed = state.store.flush_by_tag(&tag)?;
    Ok(Json(FlushResponse::new(&tag, removed)))
}

/// Handler for POST /flush
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    let removed = state.store.flush()?;
    Ok(Json(FlushResponse::new(state.store.identifier(), removed)))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Result<Json<KeysResponse>> {
    let mut keys = state.store.keys()?;
    keys.sort();

    Ok(Json(KeysResponse {
        identifier: state.store.identifier().to_string(),
        keys,
    }))
}

/// Handler for GET /servers
pub async fn servers_handler(State(state): State<AppState>) -> Json<ServersResponse> {
    Json(ServersResponse {
        servers: state.store.servers(),
    })
}

/// Handler for POST /servers
pub async fn add_server_handler(
    State(state): State<AppState>,
    Json(req): Json<AddServerRequest>,
) -> Result<Json<ServersResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    state.store.add_server(req.host, req.port, req.weight);

    Ok(Json(ServersResponse {
        servers: state.store.servers(),
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.backend().stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_err;

    fn new_state() -> AppState {
        AppState::new(NamespacedStore::new(Arc::new(MemoryBackend::new()), "test_"))
    }

    fn set_request(key: &str, tags: &[&str]) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value: json!({"key": key}),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            lifetime: None,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = new_state();

        let result = set_handler(State(state.clone()), Json(set_request("test_key", &[]))).await;
        assert!(result.is_ok());

        let response = get_handler(State(state.clone()), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"key": "test_key"}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = new_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = new_state();

        set_handler(State(state.clone()), Json(set_request("to_delete", &[])))
            .await
            .unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let has = has_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert!(!has.exists);

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert_err!(result);
    }

    #[tokio::test]
    async fn test_tag_handlers() {
        let state = new_state();

        set_handler(State(state.clone()), Json(set_request("a", &["grp"])))
            .await
            .unwrap();
        set_handler(State(state.clone()), Json(set_request("b", &["grp"])))
            .await
            .unwrap();

        let tagged = get_tag_handler(State(state.clone()), Path("grp".to_string()))
            .await
            .unwrap();
        assert_eq!(tagged.keys.len(), 2);

        let flushed = flush_tag_handler(State(state.clone()), Path("grp".to_string()))
            .await
            .unwrap();
        assert_eq!(flushed.removed, 2);

        let result = get_tag_handler(State(state), Path("grp".to_string())).await;
        assert_err!(result);
    }

    #[tokio::test]
    async fn test_flush_and_keys_handlers() {
        let state = new_state();

        set_handler(State(state.clone()), Json(set_request("b", &[])))
            .await
            .unwrap();
        set_handler(State(state.clone()), Json(set_request("a", &[])))
            .await
            .unwrap();

        let keys = keys_handler(State(state.clone())).await.unwrap();
        assert_eq!(keys.identifier, "test_");
        assert_eq!(keys.keys, vec!["a".to_string(), "b".to_string()]);

        let flushed = flush_handler(State(state.clone())).await.unwrap();
        assert_eq!(flushed.removed, 2);

        let keys = keys_handler(State(state)).await.unwrap();
        assert!(keys.keys.is_empty());
    }

    #[tokio::test]
    async fn test_server_handlers() {
        let state = new_state();

        let req = AddServerRequest {
            host: "127.0.0.1".to_string(),
            port: 11211,
            weight: 2,
        };
        let response = add_server_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.servers.len(), 1);

        let listed = servers_handler(State(state)).await;
        assert_eq!(listed.servers[0].weight, 2);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = new_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = new_state();

        let result = set_handler(State(state.clone()), Json(set_request("bad-key", &[]))).await;
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));

        let result = set_handler(State(state), Json(set_request("good", &["bad tag"]))).await;
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }
}
