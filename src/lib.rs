//! Matchday Proxy - a caching backend-for-frontend for football data
//!
//! Fetches fixtures, standings and fixture details from an API-Football
//! compatible provider, normalizes them and serves them from a TTL cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod proxy;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use proxy::MatchdayProxy;
