//! Request and Response models for the proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing service responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{FixtureDetailsParams, MatchesParams};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
