//! Cache Module
//!
//! In-memory TTL cache for normalized upstream results.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

use std::time::Duration;

// == Freshness Windows ==
/// Live match lists
pub const MATCHES_TTL: Duration = Duration::from_secs(60);

/// League tables, tracked per league
pub const STANDINGS_TTL: Duration = Duration::from_secs(15 * 60);

/// Per-fixture stats, lineups and events
pub const FIXTURE_DETAILS_TTL: Duration = Duration::from_secs(60);
