//! Fixture details normalization: stats, lineups, events and a summary.

use chrono::FixedOffset;
use serde::Serialize;
use serde_json::Value;

use crate::normalize::{normalize_match, parse_count, parse_possession, NormalizedMatch};
use crate::upstream::raw::{
    RawEvent, RawFixtureItem, RawLineup, RawLineupSlot, RawTeam, RawTeamStatistics,
};

// == Stats ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatPair {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureStats {
    pub possession: StatPair,
    pub shots: StatPair,
    pub shots_on_target: StatPair,
    pub corners: StatPair,
    pub fouls: StatPair,
    pub offsides: StatPair,
    pub yellow_cards: StatPair,
    pub red_cards: StatPair,
    pub saves: StatPair,
}

// == Lineups ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupPlayer {
    pub name: String,
    pub number: Option<u32>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLineup {
    pub team: String,
    pub logo: Option<String>,
    pub formation: Option<String>,
    pub coach: Option<String>,
    #[serde(rename = "startXI")]
    pub start_xi: Vec<LineupPlayer>,
    pub substitutes: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FixtureLineups {
    pub home: TeamLineup,
    pub away: TeamLineup,
}

// == Events ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Goal,
    Yellow,
    Red,
    Sub,
    Other,
}

/// Maps a provider event `type`/`detail` pair.
pub fn map_event_kind(kind: &str, detail: &str) -> EventKind {
    match kind {
        "Goal" => EventKind::Goal,
        "Card" if detail == "Yellow Card" => EventKind::Yellow,
        "Card" => EventKind::Red,
        "subst" => EventKind::Sub,
        _ => EventKind::Other,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub minute: i32,
    pub extra_minute: Option<i32>,
    pub team: String,
    pub is_home: bool,
    pub player: Option<String>,
    pub assist: Option<String>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub detail: Option<String>,
}

// == Summary ==
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    #[serde(flatten)]
    pub overview: NormalizedMatch,
    pub venue: Option<String>,
    pub referee: Option<String>,
    pub round: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureDetails {
    pub stats: FixtureStats,
    pub lineups: FixtureLineups,
    pub events: Vec<MatchEvent>,
    pub summary: FixtureSummary,
}

/// Combines the three per-fixture provider answers into one view.
pub fn normalize_fixture_details(
    details: &RawFixtureItem,
    events: &[RawEvent],
    lineups: &[RawLineup],
    zone: &FixedOffset,
) -> FixtureDetails {
    let home = &details.teams.home;
    let away = &details.teams.away;

    FixtureDetails {
        stats: normalize_stats(&details.statistics, home, away),
        lineups: FixtureLineups {
            home: pick_side(lineups, home, 0, |l| &l.team)
                .map(normalize_lineup)
                .unwrap_or_default(),
            away: pick_side(lineups, away, 1, |l| &l.team)
                .map(normalize_lineup)
                .unwrap_or_default(),
        },
        events: events.iter().map(|e| normalize_event(e, home)).collect(),
        summary: FixtureSummary {
            overview: normalize_match(details, zone),
            venue: venue_label(details),
            referee: details.fixture.referee.clone(),
            round: details.league.round.clone(),
        },
    }
}

/// Finds the entry for `team`: by id when both sides carry ids, else by the
/// provider's home-first position.
///
/// An id with no matching entry means that side is missing; it never falls
/// back to the other team's block.
fn pick_side<'a, T>(
    entries: &'a [T],
    team: &RawTeam,
    position: usize,
    team_of: impl Fn(&T) -> &RawTeam,
) -> Option<&'a T> {
    let entries_have_ids = entries.iter().any(|e| team_of(e).id.is_some());

    match team.id {
        Some(id) if entries_have_ids => entries.iter().find(|e| team_of(e).id == Some(id)),
        _ => entries.get(position),
    }
}

fn is_same_team(a: &RawTeam, b: &RawTeam) -> bool {
    match (a.id, b.id) {
        (Some(x), Some(y)) => x == y,
        _ => a.name.is_some() && a.name == b.name,
    }
}

static MISSING: Value = Value::Null;

fn stat_value<'a>(stats: Option<&'a RawTeamStatistics>, kind: &str) -> &'a Value {
    stats
        .and_then(|s| s.statistics.iter().find(|st| st.kind.as_deref() == Some(kind)))
        .map(|st| &st.value)
        .unwrap_or(&MISSING)
}

fn normalize_stats(
    statistics: &[RawTeamStatistics],
    home: &RawTeam,
    away: &RawTeam,
) -> FixtureStats {
    let home_stats = pick_side(statistics, home, 0, |s| &s.team);
    let away_stats = pick_side(statistics, away, 1, |s| &s.team);

    let count = |kind: &str| StatPair {
        home: parse_count(stat_value(home_stats, kind)),
        away: parse_count(stat_value(away_stats, kind)),
    };

    FixtureStats {
        possession: StatPair {
            home: parse_possession(stat_value(home_stats, "Ball Possession")),
            away: parse_possession(stat_value(away_stats, "Ball Possession")),
        },
        shots: count("Total Shots"),
        shots_on_target: count("Shots on Goal"),
        corners: count("Corner Kicks"),
        fouls: count("Fouls"),
        offsides: count("Offsides"),
        yellow_cards: count("Yellow Cards"),
        red_cards: count("Red Cards"),
        saves: count("Goalkeeper Saves"),
    }
}

fn normalize_player(slot: &RawLineupSlot) -> LineupPlayer {
    LineupPlayer {
        name: slot.player.name.clone().unwrap_or_default(),
        number: slot.player.number,
        position: slot.player.pos.clone(),
    }
}

fn normalize_lineup(lineup: &RawLineup) -> TeamLineup {
    TeamLineup {
        team: lineup.team.name.clone().unwrap_or_default(),
        logo: lineup.team.logo.clone(),
        formation: lineup.formation.clone(),
        coach: lineup.coach.name.clone(),
        start_xi: lineup.start_xi.iter().map(normalize_player).collect(),
        substitutes: lineup.substitutes.iter().map(normalize_player).collect(),
    }
}

fn normalize_event(event: &RawEvent, home: &RawTeam) -> MatchEvent {
    let kind = event.kind.as_deref().unwrap_or_default();
    let detail = event.detail.as_deref().unwrap_or_default();

    MatchEvent {
        minute: event.time.elapsed.unwrap_or(0),
        extra_minute: event.time.extra,
        team: event.team.name.clone().unwrap_or_default(),
        is_home: is_same_team(&event.team, home),
        player: event.player.name.clone(),
        assist: event.assist.name.clone(),
        kind: map_event_kind(kind, detail),
        detail: event.detail.clone(),
    }
}

fn venue_label(details: &RawFixtureItem) -> Option<String> {
    let venue = &details.fixture.venue;
    match (venue.name.as_deref(), venue.city.as_deref()) {
        (Some(name), Some(city)) => Some(format!("{}, {}", name, city)),
        (Some(name), None) => Some(name.to_string()),
        (None, city) => city.map(str::to_string),
    }
}
