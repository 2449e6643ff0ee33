//! API Module
//!
//! HTTP handlers and routing for the matchday proxy.
//!
//! # Endpoints
//! - `GET /matches` - Normalized fixtures for one day
//! - `GET /standings` - Standings of the configured leagues
//! - `GET /fixture-details` - Details of one fixture
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint
//!
//! Data responses carry an `X-Cache-Status: HIT|MISS` header.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
