//! HTTP Sports API Client
//!
//! reqwest-backed [`SportsApi`] for the API-Football v3 REST interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::UpstreamError;
use crate::upstream::{Endpoint, SportsApi};

const API_KEY_HEADER: &str = "x-apisports-key";

/// Talks to the sports data provider over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpSportsApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpSportsApi {
    /// Builds a client with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.api_base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.upstream_timeout_secs),
        )
    }
}

#[async_trait]
impl SportsApi for HttpSportsApi {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;
        let url = format!("{}{}", self.base_url, endpoint.path());

        debug!("Upstream GET {}", endpoint);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .query(&endpoint.query())
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                path: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                path: endpoint.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Transport {
                path: endpoint.to_string(),
                message: format!("unreadable body: {}", e),
            })
    }
}
