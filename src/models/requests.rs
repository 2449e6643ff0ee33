//! Request DTOs for the proxy API
//!
//! Query strings of the data routes and their validation.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::parse_league_ids;
use crate::error::ProxyError;
use crate::proxy::MatchQuery;

/// Query string of `GET /matches`
///
/// # Fields
/// - `leagues`: comma-separated league ids; configured leagues when absent
/// - `date`: `YYYY-MM-DD`; today in the display zone when absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchesParams {
    #[serde(default)]
    pub leagues: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl MatchesParams {
    /// Validates the query and converts it into a [`MatchQuery`].
    pub fn into_query(self) -> Result<MatchQuery, ProxyError> {
        let leagues = match self.leagues.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_league_ids(raw).map_err(|bad| {
                ProxyError::InvalidRequest(format!("league id '{}' is not a number", bad))
            })?),
        };

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ProxyError::InvalidRequest(format!("date '{}' is not YYYY-MM-DD", raw))
            })?),
        };

        Ok(MatchQuery { date, leagues })
    }
}

/// Query string of `GET /fixture-details`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureDetailsParams {
    #[serde(default)]
    pub id: Option<String>,
}

impl FixtureDetailsParams {
    pub fn fixture_id(&self) -> Result<u64, ProxyError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProxyError::InvalidRequest("missing fixture id".to_string()))?;

        raw.parse()
            .map_err(|_| ProxyError::InvalidRequest(format!("fixture id '{}' is not a number", raw)))
    }
}
