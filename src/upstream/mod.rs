//! Upstream Module
//!
//! Access to the third-party football data provider (API-Football v3 shape).
//!
//! The proxy only sees the [`SportsApi`] trait, so tests can substitute a
//! scripted provider for the HTTP client.

mod client;
pub mod raw;

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::error::UpstreamError;

pub use client::HttpSportsApi;

// == Endpoint ==
/// One provider resource the proxy knows how to ask for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// All fixtures on a calendar day
    Fixtures { date: NaiveDate },
    /// One fixture with its statistics
    Fixture { id: u64 },
    FixtureEvents { id: u64 },
    FixtureLineups { id: u64 },
    /// One league table for a season
    Standings { league: u32, season: u16 },
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Fixtures { .. } | Endpoint::Fixture { .. } => "/fixtures",
            Endpoint::FixtureEvents { .. } => "/fixtures/events",
            Endpoint::FixtureLineups { .. } => "/fixtures/lineups",
            Endpoint::Standings { .. } => "/standings",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Fixtures { date } => vec![("date", date.format("%Y-%m-%d").to_string())],
            Endpoint::Fixture { id } => vec![("id", id.to_string())],
            Endpoint::FixtureEvents { id } | Endpoint::FixtureLineups { id } => {
                vec![("fixture", id.to_string())]
            }
            Endpoint::Standings { league, season } => {
                vec![("league", league.to_string()), ("season", season.to_string())]
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self
            .query()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        write!(f, "{}?{}", self.path(), query)
    }
}

// == Sports API Trait ==
/// A source of raw provider responses.
#[async_trait]
pub trait SportsApi: Send + Sync {
    /// Whether credentials are present. Without them every fetch fails.
    fn is_configured(&self) -> bool;

    /// Fetches the raw JSON body for one endpoint.
    ///
    /// Non-2xx answers and transport failures are errors; the body of a 2xx
    /// answer is returned untouched.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, UpstreamError>;
}
