//! Raw provider schema
//!
//! Typed view of the provider's JSON, parsed once at the boundary. Nested
//! objects, arrays and counters default when missing, `null` or mistyped; a
//! body that is not the `{ errors, response: [...] }` envelope is a parse
//! error. An item that still fails to parse is dropped on its own.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{ParseError, UpstreamError};
use crate::upstream::Endpoint;

/// Treats an explicit `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a number or a numeric string such as `"1"`.
fn scalar<T: FromStr>(value: Value) -> Option<T> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Numeric field that defaults when `null` or not a number.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + FromStr,
{
    Ok(scalar(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional numeric field; `None` when `null` or not a number.
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(scalar(Value::deserialize(deserializer)?))
}

// == Envelope ==
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    errors: Value,
    #[serde(default, deserialize_with = "null_default")]
    response: Vec<Value>,
}

/// `errors` is `[]` or `{}` on success and a populated object otherwise.
fn api_errors(errors: &Value) -> Option<String> {
    match errors {
        Value::Array(items) if !items.is_empty() => Some(errors.to_string()),
        Value::Object(map) if !map.is_empty() => Some(errors.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Unwraps the provider envelope into typed items.
pub fn parse_response<T>(endpoint: &Endpoint, body: Value) -> Result<Vec<T>, UpstreamError>
where
    T: for<'de> Deserialize<'de>,
{
    let envelope: Envelope = serde_json::from_value(body).map_err(|source| ParseError {
        context: endpoint.path(),
        source,
    })?;

    if let Some(detail) = api_errors(&envelope.errors) {
        return Err(UpstreamError::Api {
            path: endpoint.to_string(),
            detail,
        });
    }

    let items: Vec<T> = envelope
        .response
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping malformed item {} from {}: {}", index, endpoint, e);
                None
            }
        })
        .collect();

    Ok(items)
}

// == Shared ==
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTeam {
    #[serde(deserialize_with = "lenient_option")]
    pub id: Option<u64>,
    pub name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPerson {
    pub name: Option<String>,
}

// == Fixtures ==
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFixtureItem {
    #[serde(deserialize_with = "null_default")]
    pub fixture: RawFixture,
    #[serde(deserialize_with = "null_default")]
    pub league: RawLeague,
    #[serde(deserialize_with = "null_default")]
    pub teams: RawTeams,
    #[serde(deserialize_with = "null_default")]
    pub goals: RawGoals,
    /// Only present when a single fixture is requested by id
    #[serde(deserialize_with = "null_default")]
    pub statistics: Vec<RawTeamStatistics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFixture {
    #[serde(deserialize_with = "lenient_number")]
    pub id: u64,
    pub referee: Option<String>,
    /// RFC 3339 kickoff
    pub date: Option<String>,
    /// Kickoff in Unix seconds
    #[serde(deserialize_with = "lenient_option")]
    pub timestamp: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub venue: RawVenue,
    #[serde(deserialize_with = "null_default")]
    pub status: RawStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVenue {
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStatus {
    pub short: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub elapsed: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLeague {
    #[serde(deserialize_with = "lenient_number")]
    pub id: u32,
    pub name: Option<String>,
    pub country: Option<String>,
    pub logo: Option<String>,
    pub round: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTeams {
    #[serde(deserialize_with = "null_default")]
    pub home: RawTeam,
    #[serde(deserialize_with = "null_default")]
    pub away: RawTeam,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGoals {
    #[serde(deserialize_with = "lenient_option")]
    pub home: Option<u32>,
    #[serde(deserialize_with = "lenient_option")]
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTeamStatistics {
    #[serde(deserialize_with = "null_default")]
    pub team: RawTeam,
    #[serde(deserialize_with = "null_default")]
    pub statistics: Vec<RawStatistic>,
}

/// `value` is a number, a string such as `"55%"`, or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStatistic {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Value,
}

// == Events ==
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    #[serde(deserialize_with = "null_default")]
    pub time: RawEventTime,
    #[serde(deserialize_with = "null_default")]
    pub team: RawTeam,
    #[serde(deserialize_with = "null_default")]
    pub player: RawPerson,
    #[serde(deserialize_with = "null_default")]
    pub assist: RawPerson,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEventTime {
    #[serde(deserialize_with = "lenient_option")]
    pub elapsed: Option<i32>,
    #[serde(deserialize_with = "lenient_option")]
    pub extra: Option<i32>,
}

// == Lineups ==
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLineup {
    #[serde(deserialize_with = "null_default")]
    pub team: RawTeam,
    pub formation: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub coach: RawPerson,
    #[serde(rename = "startXI", deserialize_with = "null_default")]
    pub start_xi: Vec<RawLineupSlot>,
    #[serde(deserialize_with = "null_default")]
    pub substitutes: Vec<RawLineupSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLineupSlot {
    #[serde(deserialize_with = "null_default")]
    pub player: RawLineupPlayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLineupPlayer {
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub number: Option<u32>,
    pub pos: Option<String>,
}

// == Standings ==
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStandingsItem {
    #[serde(deserialize_with = "null_default")]
    pub league: RawStandingsLeague,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStandingsLeague {
    #[serde(deserialize_with = "lenient_number")]
    pub id: u32,
    pub name: Option<String>,
    /// One table per group; single-table leagues have one
    #[serde(deserialize_with = "null_default")]
    pub standings: Vec<Vec<RawStandingRow>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStandingRow {
    #[serde(deserialize_with = "lenient_number")]
    pub rank: u32,
    #[serde(deserialize_with = "null_default")]
    pub team: RawTeam,
    #[serde(deserialize_with = "lenient_number")]
    pub points: i32,
    #[serde(rename = "goalsDiff", deserialize_with = "lenient_number")]
    pub goals_diff: i32,
    pub group: Option<String>,
    pub form: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub all: RawRecord,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(deserialize_with = "lenient_number")]
    pub played: u32,
    #[serde(deserialize_with = "lenient_number")]
    pub win: u32,
    #[serde(deserialize_with = "lenient_number")]
    pub draw: u32,
    #[serde(deserialize_with = "lenient_number")]
    pub lose: u32,
}
