//! API Handlers
//!
//! HTTP request handlers exposing the cache manager to out-of-process callers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheManager, SharedCache};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetQuery, GetResponse, HealthResponse, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the same cache handle the sweeper works on.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState owning the given cache manager.
    pub fn new(cache: CacheManager) -> Self {
        Self {
            cache: cache.into_shared(),
        }
    }

    /// Creates a new AppState around an existing shared handle.
    pub fn from_shared(cache: SharedCache) -> Self {
        Self { cache }
    }
}

/// Handler for PUT /cache/:category
///
/// Caches the JSON request body for the category.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<SetResponse>> {
    // A null payload would read back exactly like a miss
    if payload.is_null() {
        return Err(CacheError::InvalidRequest("Payload cannot be null".to_string()));
    }

    // With a FileStore the write is small blocking fs I/O under the lock
    let mut cache = state.cache.write().await;
    if !cache.categories().contains(&category) {
        return Err(CacheError::UnknownCategory(category));
    }
    if !cache.set(&category, &payload) {
        return Err(CacheError::StorageUnavailable(format!(
            "Could not cache category '{}'",
            category
        )));
    }

    Ok(Json(SetResponse::new(category)))
}

/// Handler for GET /cache/:category
///
/// Returns the cached payload; expired entries are evicted unless
/// `ignore_expiry=true`.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    // Write lock: an expired read evicts
    let mut cache = state.cache.write().await;
    if !cache.categories().contains(&category) {
        return Err(CacheError::UnknownCategory(category));
    }

    match cache.get::<Value>(&category, query.ignore_expiry) {
        Some(data) => Ok(Json(GetResponse::new(category, data))),
        None => Err(CacheError::NotCached(category)),
    }
}

/// Handler for DELETE /cache/:category
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.categories().contains(&category) {
        return Err(CacheError::UnknownCategory(category));
    }

    cache.remove(&category);
    Ok(Json(DeleteResponse::new(category)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.write().await.clear();
    Json(ClearResponse::new())
}

/// Handler for GET /stats
///
/// Reports per-category entry status and operation counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(cache.stats(), cache.counters()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
