//! Travis CI HTTP client
//!
//! Talks to the Travis v2 REST API. Public repositories need no token;
//! private ones (api.travis-ci.com) take one via `TRAVIS_TOKEN`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::provider::CiProvider;
use crate::types::{BuildsPage, Job, JobEnvelope, JobId, RepoSlug};
use crate::Result;

/// Default public API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.travis-ci.org";

/// Media type selecting the v2.1 response format.
const TRAVIS_V2_ACCEPT: &str = "application/vnd.travis-ci.2.1+json";

/// Travis client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravisConfig {
    /// API base URL, without trailing slash
    pub endpoint: String,
    /// Access token (optional for public repositories)
    pub token: Option<String>,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for TravisConfig {
    fn default() -> Self {
        TravisConfig {
            endpoint: std::env::var("TRAVIS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            token: std::env::var("TRAVIS_TOKEN").ok().filter(|t| !t.is_empty()),
            user_agent: format!("travis-watch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TravisConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific endpoint
    pub fn new(endpoint: &str) -> Self {
        TravisConfig {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: None,
            user_agent: format!("travis-watch/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn builds_url(&self, repo: &RepoSlug) -> String {
        format!(
            "{}/repos/{}/{}/builds",
            self.endpoint.trim_end_matches('/'),
            repo.user,
            repo.project
        )
    }

    pub fn job_url(&self, job_id: JobId) -> String {
        format!("{}/jobs/{}", self.endpoint.trim_end_matches('/'), job_id)
    }
}

/// reqwest-backed [`CiProvider`] for the Travis v2 API
pub struct TravisClient {
    config: TravisConfig,
    http_client: reqwest::Client,
}

impl TravisClient {
    /// Create a new Travis client
    pub fn new(config: TravisConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(TRAVIS_V2_ACCEPT));
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("token {token}"))
                .map_err(|e| ApiError::Config(format!("invalid token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(TravisClient {
            config,
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(TravisConfig::from_env())
    }

    pub fn config(&self) -> &TravisConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CiProvider for TravisClient {
    async fn list_builds(&self, repo: &RepoSlug) -> Result<BuildsPage> {
        let url = self.config.builds_url(repo);
        self.get_json(&url).await
    }

    async fn fetch_job(&self, job_id: JobId) -> Result<Job> {
        let url = self.config.job_url(job_id);
        let envelope: JobEnvelope = self.get_json(&url).await?;
        Ok(envelope.job)
    }
}
