//! Per-fixture details assembled from three provider calls.

use serde_json::Value;
use tracing::info;

use crate::cache::FIXTURE_DETAILS_TTL;
use crate::error::{ProxyError, Result};
use crate::normalize::normalize_fixture_details;
use crate::proxy::{to_json, Cached, MatchdayProxy};
use crate::upstream::raw::{RawEvent, RawFixtureItem, RawLineup};
use crate::upstream::Endpoint;

pub(crate) fn fixture_key(id: u64) -> String {
    format!("fixture:{}", id)
}

impl MatchdayProxy {
    /// Stats, lineups, events and summary for one fixture, cached 60 s.
    ///
    /// Details, events and lineups are requested together and all three are
    /// awaited. Any failure discards the rest: nothing partial is cached or
    /// returned.
    pub async fn fixture_details(&self, id: u64) -> Result<Cached<Value>> {
        self.ensure_configured()?;

        let key = fixture_key(id);
        if let Some(value) = self.lookup(&key, FIXTURE_DETAILS_TTL).await {
            return Ok(Cached::hit(value));
        }

        let details_endpoint = Endpoint::Fixture { id };
        let events_endpoint = Endpoint::FixtureEvents { id };
        let lineups_endpoint = Endpoint::FixtureLineups { id };

        let (details, events, lineups) = tokio::join!(
            self.fetch_items::<RawFixtureItem>(&details_endpoint),
            self.fetch_items::<RawEvent>(&events_endpoint),
            self.fetch_items::<RawLineup>(&lineups_endpoint)
        );
        let (details, events, lineups) = (details?, events?, lineups?);

        let Some(details) = details.into_iter().next() else {
            return Err(ProxyError::NotFound(format!("Fixture {} not found", id)));
        };

        let normalized =
            normalize_fixture_details(&details, &events, &lineups, &self.settings.zone);
        info!(
            "Fetched fixture {}: {} events, {} lineups",
            id,
            events.len(),
            lineups.len()
        );

        let value = to_json(&normalized)?;
        self.store(key, value.clone()).await;
        Ok(Cached::miss(value))
    }
}
