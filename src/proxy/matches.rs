//! Fixtures for a day, filtered to a league set.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::cache::MATCHES_TTL;
use crate::error::Result;
use crate::normalize::normalize_matches;
use crate::proxy::{to_json, Cached, MatchdayProxy};
use crate::upstream::{raw::RawFixtureItem, Endpoint};

/// Parameters of a match-list request. Unset fields take the proxy defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchQuery {
    pub date: Option<NaiveDate>,
    pub leagues: Option<Vec<u32>>,
}

pub(crate) fn matches_key(date: NaiveDate, leagues: &[u32]) -> String {
    let leagues = leagues
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("matches:{}:{}", date.format("%Y-%m-%d"), leagues)
}

impl MatchdayProxy {
    /// Normalized fixtures for one day, cached for 60 s per date and league set.
    pub async fn matches(&self, query: MatchQuery) -> Result<Cached<Value>> {
        self.ensure_configured()?;

        let date = query.date.unwrap_or_else(|| self.today());
        let leagues = query
            .leagues
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.settings.league_ids.clone());
        let key = matches_key(date, &leagues);

        if let Some(value) = self.lookup(&key, MATCHES_TTL).await {
            return Ok(Cached::hit(value));
        }

        let endpoint = Endpoint::Fixtures { date };
        let items: Vec<RawFixtureItem> = self.fetch_items(&endpoint).await?;
        let matches = normalize_matches(&items, &leagues, &self.settings.zone);
        info!(
            "Fetched {} fixtures for {}, {} in requested leagues",
            items.len(),
            date,
            matches.len()
        );

        let value = to_json(&matches)?;
        self.store(key, value.clone()).await;
        Ok(Cached::miss(value))
    }
}
