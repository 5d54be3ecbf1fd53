//! Error types for the cache layer
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
/// Failures raised by a backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store could not be reached at initialization
    #[error("Could not connect to store: {0}")]
    Connection(String),

    /// Lookup or insert failed during a call
    #[error("Store operation failed: {0}")]
    Operation(String),

    /// Collection name is not usable as a table identifier
    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),
}

// == Cache Error Enum ==
/// Error returned by a memoized call.
///
/// The wrapped function's own error is carried unchanged in `Function`.
#[derive(Error, Debug)]
pub enum CacheError<E> {
    /// The backing store failed during lookup or insert
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The wrapped function failed; nothing was stored
    #[error(transparent)]
    Function(E),
}

// == Fetch Error Enum ==
/// Failures of the HTTP fetcher.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

// == API Error Enum ==
/// Error type for the fetch-through HTTP service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream fetch failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Backing store failed
    #[error("Store error: {0}")]
    Store(String),
}

impl From<CacheError<FetchError>> for ApiError {
    fn from(err: CacheError<FetchError>) -> Self {
        match err {
            CacheError::Store(e) => ApiError::Store(e.to_string()),
            CacheError::Function(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
