//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;

/// Saudi Pro League, Premier League, La Liga, Serie A, Bundesliga
pub const DEFAULT_LEAGUE_IDS: [u32; 5] = [307, 39, 140, 135, 78];

pub const DEFAULT_API_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sports data provider key; data routes answer 500 without it
    pub api_key: Option<String>,
    /// Sports data provider base URL
    pub api_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Leagues served by /standings and by /matches when none are requested
    pub league_ids: Vec<u32>,
    /// Season for standings; derived from the date when unset
    pub season: Option<u16>,
    /// Offset from UTC used for kickoff times and the default match date
    pub display_utc_offset_hours: i32,
    /// Per-request timeout for upstream calls
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FOOTBALL_API_KEY` - Provider key (default: unset)
    /// - `FOOTBALL_API_BASE_URL` - Provider base URL
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `LEAGUE_IDS` - Comma-separated league ids (default: 307,39,140,135,78)
    /// - `STANDINGS_SEASON` - Season year (default: derived)
    /// - `DISPLAY_UTC_OFFSET_HOURS` - Display offset (default: 3)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("FOOTBALL_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            api_base_url: env::var("FOOTBALL_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            league_ids: env::var("LEAGUE_IDS")
                .ok()
                .and_then(|v| parse_league_ids(&v).ok())
                .filter(|ids| !ids.is_empty())
                .unwrap_or(defaults.league_ids),
            season: env::var("STANDINGS_SEASON")
                .ok()
                .and_then(|v| v.parse().ok()),
            display_utc_offset_hours: env::var("DISPLAY_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|h: &i32| (-12..=14).contains(h))
                .unwrap_or(defaults.display_utc_offset_hours),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.upstream_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            server_port: 3000,
            league_ids: DEFAULT_LEAGUE_IDS.to_vec(),
            season: None,
            display_utc_offset_hours: 3,
            upstream_timeout_secs: 10,
        }
    }
}

/// Parses a comma-separated list of numeric league ids.
///
/// Blank segments are skipped; any other non-numeric segment is an error
/// carrying the offending text.
pub fn parse_league_ids(raw: &str) -> std::result::Result<Vec<u32>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().map_err(|_| s.to_string()))
        .collect()
}
