//! Error types for the tagged store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Unified error type for the store and its HTTP surface.
///
/// Absence is never an error inside the store itself: reads return `None`
/// and removals return `false`. `NotFound` is only produced by the HTTP
/// layer when it has to turn absence into a response.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key or tag not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data (bad identifier, tag or server descriptor)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend could not be reached or refused the operation
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StoreError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::BackendUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
