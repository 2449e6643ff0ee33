//! League table normalization.

use serde::Serialize;

use crate::upstream::raw::RawStandingsItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStanding {
    pub league_id: u32,
    pub league_name: String,
    pub rank: u32,
    pub team: String,
    pub team_logo: Option<String>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goal_difference: i32,
    pub points: i32,
    pub group: Option<String>,
    pub form: Option<String>,
}

/// Flattens every group table of every league into rows, in provider order.
pub fn normalize_standings(items: &[RawStandingsItem]) -> Vec<NormalizedStanding> {
    items
        .iter()
        .flat_map(|item| {
            let league = &item.league;
            league.standings.iter().flatten().map(move |row| NormalizedStanding {
                league_id: league.id,
                league_name: league.name.clone().unwrap_or_default(),
                rank: row.rank,
                team: row.team.name.clone().unwrap_or_default(),
                team_logo: row.team.logo.clone(),
                played: row.all.played,
                won: row.all.win,
                drawn: row.all.draw,
                lost: row.all.lose,
                goal_difference: row.goals_diff,
                points: row.points,
                group: row.group.clone(),
                form: row.form.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items(value: serde_json::Value) -> Vec<RawStandingsItem> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_single_table() {
        let raw = items(json!([{
            "league": {
                "id": 307,
                "name": "Pro League",
                "standings": [[
                    {"rank": 1, "team": {"name": "Al Hilal", "logo": "h.png"}, "points": 50, "goalsDiff": 30,
                     "form": "WWWDW", "all": {"played": 20, "win": 16, "draw": 2, "lose": 2}},
                    {"rank": 2, "team": {"name": "Al Nassr"}, "points": 44, "goalsDiff": 21,
                     "all": {"played": 20, "win": 14, "draw": 2, "lose": 4}}
                ]]
            }
        }]));

        let rows = normalize_standings(&raw);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team, "Al Hilal");
        assert_eq!(rows[0].won, 16);
        assert_eq!(rows[0].drawn, 2);
        assert_eq!(rows[0].goal_difference, 30);
        assert_eq!(rows[0].form.as_deref(), Some("WWWDW"));
        assert_eq!(rows[1].league_id, 307);
        assert_eq!(rows[1].lost, 4);
    }

    #[test]
    fn test_normalize_flattens_groups() {
        let raw = items(json!([{
            "league": {
                "id": 2,
                "name": "Cup",
                "standings": [
                    [{"rank": 1, "team": {"name": "A"}, "group": "Group A"}],
                    [{"rank": 1, "team": {"name": "B"}, "group": "Group B"}]
                ]
            }
        }]));

        let rows = normalize_standings(&raw);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].group.as_deref(), Some("Group B"));
        assert_eq!(rows[1].played, 0);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize_standings(&[]).is_empty());
    }
}
