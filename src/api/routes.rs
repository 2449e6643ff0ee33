//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{http::HeaderName, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    fixture_details_handler, health_handler, matches_handler, standings_handler, stats_handler,
    AppState, CACHE_STATUS_HEADER,
};

/// Endpoints served both at the root and under `/api`.
fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/matches", get(matches_handler))
        .route("/standings", get(standings_handler))
        .route("/fixture-details", get(fixture_details_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /matches?leagues=&date=` - Normalized fixtures for one day
/// - `GET /standings` - Standings of every configured league
/// - `GET /fixture-details?id=` - Stats, lineups, events and summary
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// Every route is also mounted under `/api`.
///
/// # Middleware
/// - CORS: Allows any origin and exposes `X-Cache-Status`
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(CACHE_STATUS_HEADER)]);

    Router::new()
        .merge(data_routes())
        .nest("/api", data_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tokio::sync::RwLock;
    use tower::util::ServiceExt;

    use crate::cache::{CacheStore, ManualClock};
    use crate::proxy::{test_support::ScriptedApi, MatchdayProxy, ProxySettings};

    fn create_test_app(api: ScriptedApi) -> Router {
        let proxy = MatchdayProxy::new(
            Arc::new(api),
            Arc::new(RwLock::new(CacheStore::new())),
            Arc::new(ManualClock::new(0)),
            ProxySettings::default(),
        );
        create_router(AppState::new(proxy))
    }

    async fn get_status(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(ScriptedApi::new());
        assert_eq!(get_status(app, "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_prefix() {
        let app = create_test_app(ScriptedApi::new());
        assert_eq!(get_status(app.clone(), "/api/health").await, StatusCode::OK);
        assert_eq!(get_status(app, "/api/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_key_is_server_error() {
        let app = create_test_app(ScriptedApi::default());
        assert_eq!(
            get_status(app, "/matches").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_bad_fixture_id() {
        let app = create_test_app(ScriptedApi::new());
        assert_eq!(
            get_status(app, "/fixture-details?id=abc").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_test_app(ScriptedApi::new());
        assert_eq!(get_status(app, "/set").await, StatusCode::NOT_FOUND);
    }
}
