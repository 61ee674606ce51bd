//! Error types for the cache
//!
//! Provides unified error handling using thiserror. The cache manager itself
//! never returns these to its callers; they surface only from the storage
//! substrate (where the manager logs and swallows them) and from the HTTP
//! facade.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Storage Error Enum ==
/// Failure reported by a key-value storage substrate.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Writing would exceed the configured byte quota
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Key cannot be represented by the substrate
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Cache Error Enum ==
/// Error type for the HTTP facade over the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Category is not part of the configured policy table
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Category has no live entry (never written, removed, expired or unreadable)
    #[error("Nothing cached for category: {0}")]
    NotCached(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The write could not be persisted
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            CacheError::NotCached(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP facade.
pub type Result<T> = std::result::Result<T, CacheError>;
