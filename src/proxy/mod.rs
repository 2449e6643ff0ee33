//! Proxy Module
//!
//! The fetch-cache operations: look a request key up in the TTL cache, and on
//! a miss fetch from the provider, normalize, store and return.
//!
//! # Operations
//! - [`MatchdayProxy::matches`] - fixtures for a day, 60 s per key
//! - [`MatchdayProxy::standings`] - league tables, 15 min per league
//! - [`MatchdayProxy::fixture_details`] - stats, lineups, events, 60 s per fixture
//!
//! Refreshes are not de-duplicated: two concurrent misses on one key both go
//! upstream and the later completion overwrites the earlier.

mod fixture_details;
mod matches;
mod standings;

pub use matches::MatchQuery;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::cache::{CacheStore, Clock};
use crate::config::Config;
use crate::error::{ProxyError, Result, UpstreamError};
use crate::normalize::display_zone;
use crate::upstream::{raw::parse_response, Endpoint, SportsApi};

// == Cache Status ==
/// Whether a response was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// A normalized payload and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub status: CacheStatus,
}

impl<T> Cached<T> {
    pub fn hit(value: T) -> Self {
        Self {
            value,
            status: CacheStatus::Hit,
        }
    }

    pub fn miss(value: T) -> Self {
        Self {
            value,
            status: CacheStatus::Miss,
        }
    }
}

// == Proxy Settings ==
/// Request-independent inputs to the operations.
#[derive(Debug, Clone)]
pub struct ProxySettings {
    /// Leagues for /standings and the default /matches filter
    pub league_ids: Vec<u32>,
    /// Pinned standings season; derived from the date when `None`
    pub season: Option<u16>,
    /// Zone for kickoff times and "today"
    pub zone: FixedOffset,
}

impl ProxySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            league_ids: config.league_ids.clone(),
            season: config.season,
            zone: display_zone(config.display_utc_offset_hours),
        }
    }
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// European-style seasons start in July: before that, the season is named
/// after the previous year.
pub fn season_for(date: NaiveDate) -> u16 {
    let year = if date.month() >= 7 {
        date.year()
    } else {
        date.year() - 1
    };
    year.clamp(0, u16::MAX as i32) as u16
}

// == Matchday Proxy ==
/// The fetch-cache proxy. Cheap to clone; clones share one cache.
#[derive(Clone)]
pub struct MatchdayProxy {
    api: Arc<dyn SportsApi>,
    cache: Arc<RwLock<CacheStore>>,
    clock: Arc<dyn Clock>,
    settings: Arc<ProxySettings>,
}

impl MatchdayProxy {
    pub fn new(
        api: Arc<dyn SportsApi>,
        cache: Arc<RwLock<CacheStore>>,
        clock: Arc<dyn Clock>,
        settings: ProxySettings,
    ) -> Self {
        Self {
            api,
            cache,
            clock,
            settings: Arc::new(settings),
        }
    }

    pub fn cache(&self) -> &Arc<RwLock<CacheStore>> {
        &self.cache
    }

    pub fn settings(&self) -> &ProxySettings {
        &self.settings
    }

    pub fn upstream_configured(&self) -> bool {
        self.api.is_configured()
    }

    /// Today's date in the display zone, per the injected clock.
    pub fn today(&self) -> NaiveDate {
        let now = Utc
            .timestamp_millis_opt(self.clock.now_ms() as i64)
            .single()
            .unwrap_or_default();
        now.with_timezone(&self.settings.zone).date_naive()
    }

    pub fn season(&self) -> u16 {
        self.settings.season.unwrap_or_else(|| season_for(self.today()))
    }

    /// Fails fast without credentials, before any cache or upstream work.
    fn ensure_configured(&self) -> Result<()> {
        if self.api.is_configured() {
            Ok(())
        } else {
            error!("Sports API key is not configured; refusing data request");
            Err(UpstreamError::MissingApiKey.into())
        }
    }

    /// Looks `key` up against `ttl`.
    async fn lookup(&self, key: &str, ttl: Duration) -> Option<Value> {
        let now = self.clock.now_ms();
        // Write lock: lookups update hit/miss statistics
        let mut cache = self.cache.write().await;
        let found = cache.lookup(key, ttl.as_millis() as u64, now);
        debug!(
            "Cache {} for {}",
            if found.is_some() { "HIT" } else { "MISS" },
            key
        );
        found
    }

    /// Stores a payload stamped with the completion time.
    async fn store(&self, key: String, value: Value) {
        let now = self.clock.now_ms();
        self.cache.write().await.insert(key, value, now);
    }

    /// Fetches one endpoint and unwraps its envelope.
    async fn fetch_items<T>(&self, endpoint: &Endpoint) -> std::result::Result<Vec<T>, UpstreamError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let result = match self.api.fetch(endpoint).await {
            Ok(body) => parse_response(endpoint, body),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!("Upstream fetch failed: {}", e);
        }
        result
    }
}

/// Converts a normalized payload into the JSON value that gets cached.
fn to_json<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| ProxyError::Internal(e.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted provider shared by the proxy tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::error::UpstreamError;
    use crate::upstream::{Endpoint, SportsApi};

    /// Answers each endpoint from a table; unscripted endpoints fail with 500.
    #[derive(Default)]
    pub struct ScriptedApi {
        pub configured: bool,
        responses: Mutex<HashMap<Endpoint, Value>>,
        calls: Mutex<Vec<Endpoint>>,
        pub total_calls: AtomicUsize,
    }

    impl ScriptedApi {
        pub fn new() -> Self {
            Self {
                configured: true,
                ..Self::default()
            }
        }

        pub fn respond(&self, endpoint: Endpoint, body: Value) {
            self.responses.lock().unwrap().insert(endpoint, body);
        }

        pub fn fail(&self, endpoint: &Endpoint) {
            self.responses.lock().unwrap().remove(endpoint);
        }

        pub fn calls_to(&self, endpoint: &Endpoint) -> usize {
            self.calls.lock().unwrap().iter().filter(|e| *e == endpoint).count()
        }

        pub fn calls(&self) -> usize {
            self.total_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SportsApi for ScriptedApi {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, UpstreamError> {
            self.total_calls.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(endpoint.clone());
            self.responses
                .lock()
                .unwrap()
                .get(endpoint)
                .cloned()
                .ok_or_else(|| UpstreamError::Status {
                    status: 500,
                    path: endpoint.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    #[test]
    fn test_season_for() {
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()), 2023);
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()), 2024);
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 2024);
    }

    #[test]
    fn test_today_uses_display_zone() {
        // 2024-05-01T22:30:00Z is already May 2nd at UTC+3
        let clock = Arc::new(ManualClock::new(1_714_602_600_000));
        let proxy = MatchdayProxy::new(
            Arc::new(test_support::ScriptedApi::new()),
            Arc::new(RwLock::new(CacheStore::new())),
            clock,
            ProxySettings::default(),
        );

        assert_eq!(proxy.today(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(proxy.season(), 2023);
    }

    #[test]
    fn test_pinned_season_wins() {
        let settings = ProxySettings {
            season: Some(2022),
            ..ProxySettings::default()
        };
        let proxy = MatchdayProxy::new(
            Arc::new(test_support::ScriptedApi::new()),
            Arc::new(RwLock::new(CacheStore::new())),
            Arc::new(ManualClock::new(0)),
            settings,
        );

        assert_eq!(proxy.season(), 2022);
    }

    #[test]
    fn test_cache_status_strings() {
        assert_eq!(CacheStatus::Hit.as_str(), "HIT");
        assert_eq!(CacheStatus::Miss.as_str(), "MISS");
    }
}
