//! League tables, cached per league.

use futures::future::join_all;
use serde_json::Value;
use tracing::info;

use crate::cache::STANDINGS_TTL;
use crate::error::{ProxyError, Result};
use crate::normalize::normalize_standings;
use crate::proxy::{to_json, CacheStatus, Cached, MatchdayProxy};
use crate::upstream::{raw::RawStandingsItem, Endpoint};

pub(crate) fn standings_key(league: u32, season: u16) -> String {
    format!("standings:{}:{}", league, season)
}

impl MatchdayProxy {
    /// Flattened tables of every configured league.
    ///
    /// Each league has its own 15 minute window. Stale leagues are fetched
    /// concurrently; a league that fails leaves its cache slot untouched and
    /// fails the whole call, while leagues that succeeded stay cached.
    pub async fn standings(&self) -> Result<Cached<Value>> {
        self.ensure_configured()?;

        let season = self.season();
        let leagues = self.settings.league_ids.clone();

        let mut tables: Vec<Option<Value>> = Vec::with_capacity(leagues.len());
        let mut stale = Vec::new();
        for (slot, league) in leagues.iter().copied().enumerate() {
            let cached = self.lookup(&standings_key(league, season), STANDINGS_TTL).await;
            if cached.is_none() {
                stale.push((slot, league));
            }
            tables.push(cached);
        }

        let status = if stale.is_empty() {
            CacheStatus::Hit
        } else {
            CacheStatus::Miss
        };

        let fetched = join_all(
            stale
                .into_iter()
                .map(|(slot, league)| async move { (slot, self.refresh_table(league, season).await) }),
        )
        .await;

        let mut failure = None;
        for (slot, result) in fetched {
            match result {
                Ok(table) => tables[slot] = Some(table),
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let rows: Vec<Value> = tables
            .into_iter()
            .flatten()
            .flat_map(|table| match table {
                Value::Array(rows) => rows,
                _ => Vec::new(),
            })
            .collect();

        Ok(Cached {
            value: Value::Array(rows),
            status,
        })
    }

    /// Fetches, normalizes and caches one league's table.
    async fn refresh_table(&self, league: u32, season: u16) -> Result<Value> {
        let endpoint = Endpoint::Standings { league, season };
        let items: Vec<RawStandingsItem> = self
            .fetch_items(&endpoint)
            .await
            .map_err(ProxyError::from)?;
        let rows = normalize_standings(&items);
        info!("Fetched standings for league {} ({} rows)", league, rows.len());

        let value = to_json(&rows)?;
        self.store(standings_key(league, season), value.clone()).await;
        Ok(value)
    }
}
