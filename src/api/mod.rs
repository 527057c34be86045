//! API Module
//!
//! HTTP handlers and routing exposing a namespaced store over REST.
//!
//! # Endpoints
//! - `PUT /set` - Store a value with optional tags
//! - `GET /get/:key`, `GET /has/:key`, `DELETE /del/:key` - Single entries
//! - `GET /tag/:tag`, `DELETE /tag/:tag` - Tag lookup and invalidation
//! - `POST /flush`, `GET /keys` - Whole namespace
//! - `GET /servers`, `POST /servers` - Server list bookkeeping
//! - `GET /stats`, `GET /health` - Monitoring

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
