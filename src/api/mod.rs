//! API Module
//!
//! HTTP handlers and routing for the fetch-through service.
//!
//! # Endpoints
//! - `GET /fetch?url=...` - Memoized fetch of a URL
//! - `GET /stats` - Call outcome counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
