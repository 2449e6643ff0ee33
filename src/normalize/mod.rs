//! Normalize Module
//!
//! Pure projections of raw provider data into the site's domain shape.
//! Nothing here holds state: the same input always yields the same output.

mod fixture;
mod matches;
mod standings;


pub use fixture::{
    map_event_kind, normalize_fixture_details, EventKind, FixtureDetails, FixtureLineups,
    FixtureStats, FixtureSummary, LineupPlayer, MatchEvent, StatPair, TeamLineup,
};
pub use matches::{normalize_match, normalize_matches, MatchStatus, NormalizedMatch};
pub use standings::{normalize_standings, NormalizedStanding};

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use serde_json::Value;

/// Shown for a finished (`FT`) match.
pub const LABEL_ENDED: &str = "انتهت";
/// Shown at halftime.
pub const LABEL_HALFTIME: &str = "استراحة";

const COUNTRY_LABELS: &[(&str, &str)] = &[
    ("Saudi-Arabia", "السعودية"),
    ("England", "إنجلترا"),
    ("Spain", "إسبانيا"),
    ("Italy", "إيطاليا"),
    ("Germany", "ألمانيا"),
    ("France", "فرنسا"),
    ("Egypt", "مصر"),
    ("Qatar", "قطر"),
    ("United-Arab-Emirates", "الإمارات"),
    ("World", "عالمي"),
];

/// Maps a provider country name to its Arabic region label.
///
/// Unknown names pass through unchanged.
pub fn translate_country(country: &str) -> String {
    COUNTRY_LABELS
        .iter()
        .find(|(from, _)| *from == country)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| country.to_string())
}

/// Resolves a kickoff instant from the RFC 3339 string, falling back to the
/// Unix timestamp.
pub fn parse_kickoff(date: Option<&str>, timestamp: Option<i64>) -> Option<DateTime<Utc>> {
    date.and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|d| d.with_timezone(&Utc))
        .or_else(|| timestamp.and_then(|ts| Utc.timestamp_opt(ts, 0).single()))
}

/// Builds the display offset, clamping to UTC when out of range.
pub fn display_zone(utc_offset_hours: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_hours.saturating_mul(3600)).unwrap_or_else(|| Utc.fix())
}

/// The text shown in a match's clock slot.
///
/// `FT` and `HT` get fixed labels; otherwise elapsed minutes win over the
/// kickoff time, which is rendered as 24-hour `HH:MM` in `zone`.
pub fn display_time(
    short: &str,
    elapsed: Option<u32>,
    kickoff: Option<DateTime<Utc>>,
    zone: &FixedOffset,
) -> String {
    match (short, elapsed) {
        ("FT", _) => LABEL_ENDED.to_string(),
        ("HT", _) => LABEL_HALFTIME.to_string(),
        (_, Some(minutes)) => format!("{}'", minutes),
        _ => kickoff
            .map(|k| k.with_timezone(zone).format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string()),
    }
}

/// Reads a `"55%"` style possession value; 50 when absent or unreadable.
pub fn parse_possession(value: &Value) -> u32 {
    let parsed = match value {
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };

    parsed
        .filter(|p| p.is_finite() && (0.0..=100.0).contains(p))
        .map(|p| p.round() as u32)
        .unwrap_or(50)
}

/// Reads a counting statistic; 0 when absent or unreadable.
pub fn parse_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().map(|v| v.min(u32::MAX as u64) as u32).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
