//! API Routes
//!
//! Configures the Axum router with all store endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_server_handler, delete_handler, flush_handler, flush_tag_handler, get_handler,
    get_tag_handler, has_handler, health_handler, keys_handler, servers_handler, set_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a value with optional tags
/// - `GET /get/:key` - Retrieve a value by key
/// - `GET /has/:key` - Check whether a key exists
/// - `DELETE /del/:key` - Remove a key
/// - `GET /tag/:tag` - List the keys carrying a tag
/// - `DELETE /tag/:tag` - Remove every entry carrying a tag
/// - `POST /flush` - Remove every entry of the namespace
/// - `GET /keys` - List the namespace's keys
/// - `GET /servers`, `POST /servers` - Read or extend the server list
/// - `GET /stats` - Backend statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/has/:key", get(has_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/tag/:tag", get(get_tag_handler).delete(flush_tag_handler))
        .route("/flush", post(flush_handler))
        .route("/keys", get(keys_handler))
        .route("/servers", get(servers_handler).post(add_server_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
