//! Match list normalization.

use chrono::FixedOffset;
use serde::Serialize;

use crate::normalize::{display_time, parse_kickoff, translate_country};
use crate::upstream::raw::RawFixtureItem;

// == Match Status ==
/// Coarse match state shown by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

impl MatchStatus {
    /// Maps a provider short status code.
    ///
    /// In-play codes are `LIVE`, not-started codes are `UPCOMING`, and every
    /// other code (including unknown ones) is `FINISHED`.
    pub fn from_short_code(short: &str) -> Self {
        match short {
            "1H" | "HT" | "2H" | "ET" | "BT" | "P" | "LIVE" | "INT" => MatchStatus::Live,
            "TBD" | "NS" => MatchStatus::Upcoming,
            _ => MatchStatus::Finished,
        }
    }
}

// == Normalized Match ==
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMatch {
    pub id: u64,
    pub home_team: String,
    pub home_logo: Option<String>,
    pub away_team: String,
    pub away_logo: Option<String>,
    pub home_score: u32,
    pub away_score: u32,
    pub status: MatchStatus,
    /// Clock slot text: label, elapsed minutes, or local kickoff time
    pub time: String,
    /// Kickoff instant, RFC 3339 UTC
    pub kickoff: Option<String>,
    pub league: String,
    pub league_id: u32,
    pub league_logo: Option<String>,
    /// Translated region label
    pub country: String,
}

pub fn normalize_match(item: &RawFixtureItem, zone: &FixedOffset) -> NormalizedMatch {
    let short = item.fixture.status.short.as_deref().unwrap_or_default();
    let kickoff = parse_kickoff(item.fixture.date.as_deref(), item.fixture.timestamp);

    NormalizedMatch {
        id: item.fixture.id,
        home_team: item.teams.home.name.clone().unwrap_or_default(),
        home_logo: item.teams.home.logo.clone(),
        away_team: item.teams.away.name.clone().unwrap_or_default(),
        away_logo: item.teams.away.logo.clone(),
        home_score: item.goals.home.unwrap_or(0),
        away_score: item.goals.away.unwrap_or(0),
        status: MatchStatus::from_short_code(short),
        time: display_time(short, item.fixture.status.elapsed, kickoff, zone),
        kickoff: kickoff.map(|k| k.to_rfc3339()),
        league: item.league.name.clone().unwrap_or_default(),
        league_id: item.league.id,
        league_logo: item.league.logo.clone(),
        country: translate_country(item.league.country.as_deref().unwrap_or_default()),
    }
}

/// Normalizes the fixtures whose league is in `leagues`, keeping provider order.
pub fn normalize_matches(
    items: &[RawFixtureItem],
    leagues: &[u32],
    zone: &FixedOffset,
) -> Vec<NormalizedMatch> {
    items
        .iter()
        .filter(|item| leagues.contains(&item.league.id))
        .map(|item| normalize_match(item, zone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::display_zone;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawFixtureItem {
        serde_json::from_value(value).unwrap()
    }

    fn live_fixture() -> RawFixtureItem {
        raw(json!({
            "fixture": {
                "id": 1001,
                "date": "2024-05-01T18:00:00+00:00",
                "status": {"short": "1H", "elapsed": 23}
            },
            "league": {"id": 307, "name": "Pro League", "country": "Saudi-Arabia", "logo": "l.png"},
            "teams": {
                "home": {"name": "Al Hilal", "logo": "h.png"},
                "away": {"name": "Al Nassr", "logo": "a.png"}
            },
            "goals": {"home": 1, "away": 0}
        }))
    }

    #[test]
    fn test_status_mapping() {
        for code in ["1H", "HT", "2H", "ET", "BT", "P", "LIVE", "INT"] {
            assert_eq!(MatchStatus::from_short_code(code), MatchStatus::Live, "{}", code);
        }
        for code in ["TBD", "NS"] {
            assert_eq!(MatchStatus::from_short_code(code), MatchStatus::Upcoming, "{}", code);
        }
        for code in ["FT", "AET", "PEN", "PST", "CANC", "ABD", "AWD", "WO", "SUSP", ""] {
            assert_eq!(MatchStatus::from_short_code(code), MatchStatus::Finished, "{}", code);
        }
    }

    #[test]
    fn test_status_serializes_upper_case() {
        assert_eq!(serde_json::to_value(MatchStatus::Upcoming).unwrap(), "UPCOMING");
        assert_eq!(serde_json::to_value(MatchStatus::Live).unwrap(), "LIVE");
        assert_eq!(serde_json::to_value(MatchStatus::Finished).unwrap(), "FINISHED");
    }

    #[test]
    fn test_normalize_live_match() {
        let m = normalize_match(&live_fixture(), &display_zone(3));

        assert_eq!(m.id, 1001);
        assert_eq!(m.home_team, "Al Hilal");
        assert_eq!(m.away_logo.as_deref(), Some("a.png"));
        assert_eq!(m.home_score, 1);
        assert_eq!(m.status, MatchStatus::Live);
        assert_eq!(m.time, "23'");
        assert_eq!(m.country, "السعودية");
        assert_eq!(m.kickoff.as_deref(), Some("2024-05-01T18:00:00+00:00"));
    }

    #[test]
    fn test_normalize_upcoming_match_shows_kickoff() {
        let item = raw(json!({
            "fixture": {"id": 5, "date": "2024-05-01T17:30:00+00:00", "status": {"short": "NS", "elapsed": null}},
            "league": {"id": 39, "name": "Premier League", "country": "England"},
            "teams": {"home": {"name": "A"}, "away": {"name": "B"}},
            "goals": {"home": null, "away": null}
        }));

        let m = normalize_match(&item, &display_zone(3));
        assert_eq!(m.status, MatchStatus::Upcoming);
        assert_eq!(m.time, "20:30");
        assert_eq!(m.home_score, 0);
        assert_eq!(m.country, "إنجلترا");
    }

    #[test]
    fn test_normalize_matches_filters_leagues() {
        let mut other = live_fixture();
        other.league.id = 999;

        let items = vec![live_fixture(), other];
        let out = normalize_matches(&items, &[307], &display_zone(3));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].league_id, 307);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(normalize_match(&live_fixture(), &display_zone(3))).unwrap();

        assert_eq!(value["homeTeam"], "Al Hilal");
        assert_eq!(value["status"], "LIVE");
        assert_eq!(value["leagueId"], 307);
    }
}
