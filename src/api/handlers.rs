//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheStore, SystemClock};
use crate::config::Config;
use crate::error::{ApiError, Fallback, ProxyError};
use crate::models::{FixtureDetailsParams, HealthResponse, MatchesParams, StatsResponse};
use crate::proxy::{Cached, MatchdayProxy, ProxySettings};
use crate::upstream::HttpSportsApi;

/// Header reporting whether a data response came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache-status";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: MatchdayProxy,
}

impl AppState {
    pub fn new(proxy: MatchdayProxy) -> Self {
        Self { proxy }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the HTTP provider client, an empty cache and the system clock.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let api = HttpSportsApi::from_config(config)?;
        let proxy = MatchdayProxy::new(
            Arc::new(api),
            Arc::new(RwLock::new(CacheStore::new())),
            Arc::new(SystemClock),
            ProxySettings::from_config(config),
        );
        Ok(Self::new(proxy))
    }
}

/// Serves a cached payload with its `X-Cache-Status` header.
fn cached_response(cached: Cached<Value>) -> Response {
    (
        [(CACHE_STATUS_HEADER, cached.status.as_str())],
        Json(cached.value),
    )
        .into_response()
}

/// Handler for GET /matches
///
/// 200 with the normalized match list, 502 with `[]` when upstream fails.
pub async fn matches_handler(
    State(state): State<AppState>,
    Query(params): Query<MatchesParams>,
) -> Result<Response, ApiError> {
    let list_error = |e: ProxyError| ApiError::new(e, Fallback::EmptyList);

    let query = params.into_query().map_err(list_error)?;
    let cached = state.proxy.matches(query).await.map_err(list_error)?;

    Ok(cached_response(cached))
}

/// Handler for GET /standings
///
/// 200 with every configured league's rows, 502 with `[]` when upstream fails.
pub async fn standings_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let cached = state
        .proxy
        .standings()
        .await
        .map_err(|e| ApiError::new(e, Fallback::EmptyList))?;

    Ok(cached_response(cached))
}

/// Handler for GET /fixture-details
///
/// 200 with `{stats, lineups, events, summary}`, 404 for an unknown fixture,
/// 502 with `null` when any upstream part fails.
pub async fn fixture_details_handler(
    State(state): State<AppState>,
    Query(params): Query<FixtureDetailsParams>,
) -> Result<Response, ApiError> {
    let object_error = |e: ProxyError| ApiError::new(e, Fallback::Null);

    let id = params.fixture_id().map_err(object_error)?;
    let cached = state.proxy.fixture_details(id).await.map_err(object_error)?;

    Ok(cached_response(cached))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.proxy.cache().read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.proxy.upstream_configured()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::cache::ManualClock;
    use crate::proxy::test_support::ScriptedApi;
    use crate::upstream::Endpoint;

    fn state_with(api: ScriptedApi) -> AppState {
        AppState::new(MatchdayProxy::new(
            Arc::new(api),
            Arc::new(RwLock::new(CacheStore::new())),
            Arc::new(ManualClock::new(0)),
            ProxySettings::default(),
        ))
    }

    #[tokio::test]
    async fn test_matches_handler_sets_cache_header() {
        let api = ScriptedApi::new();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        api.respond(Endpoint::Fixtures { date }, json!({"errors": [], "response": []}));
        let state = state_with(api);

        let params = MatchesParams {
            leagues: Some("307".into()),
            date: Some("2024-05-01".into()),
        };
        let response = matches_handler(State(state), Query(params)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_STATUS_HEADER], "MISS");
    }

    #[tokio::test]
    async fn test_fixture_details_handler_missing_id() {
        let state = state_with(ScriptedApi::new());

        let err = fixture_details_handler(State(state), Query(FixtureDetailsParams::default()))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_standings_handler_upstream_failure() {
        // nothing scripted: every league fails
        let state = state_with(ScriptedApi::new());

        let err = standings_handler(State(state)).await.unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.fallback, Fallback::EmptyList);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = state_with(ScriptedApi::new());

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(state_with(ScriptedApi::default()))).await;
        assert_eq!(response.status, "healthy");
        assert!(!response.upstream_configured);
    }
}
