//! API Handlers
//!
//! HTTP request handlers for the fetch-through service.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::warn;

use crate::config::Config;
use crate::error::{ApiError, StoreError};
use crate::fetch::{HttpFetcher, SharedFetcher};
use crate::memoize::{Expiration, Memoized};
use crate::models::{FetchQuery, HealthResponse, StatsResponse};
use crate::store;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Memoized fetcher answering /fetch
    pub cache: Arc<Memoized<SharedFetcher>>,
}

impl AppState {
    /// Creates a new AppState around a memoized fetcher.
    pub fn new(cache: Memoized<SharedFetcher>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Connects the configured store and wraps an `HttpFetcher` with it.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store = store::connect(config).await?;
        let fetcher: SharedFetcher = Arc::new(HttpFetcher::new());
        let expiration = config
            .max_age
            .map(Expiration::max_age)
            .unwrap_or(Expiration::Never);

        Ok(Self::new(
            Memoized::new(store, fetcher).with_expiration(expiration),
        ))
    }
}

/// Handler for GET /fetch?url=...
///
/// Returns the body for `url`, from the store when cached.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let body = state.cache.call(&query.url).await.map_err(|e| {
        warn!("Fetch of {} failed: {}", query.url, e);
        ApiError::from(e)
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// Handler for GET /stats
///
/// Returns call outcome counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
