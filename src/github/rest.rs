//! GitHub REST API client
//!
//! This module implements the CheckSuiteSource and WorkflowRunSource traits
//! over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::domain::RefTarget;
use crate::error::{Result, SuitewaitError};
use crate::github::client::{ApiResponse, CheckSuiteSource, WorkflowRunSource};

/// Public GitHub API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version header value
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Largest page size the listing endpoint accepts
const PER_PAGE: u32 = 100;

/// Configuration for the GitHub client
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GitHubConfig {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// GitHub REST client
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("suitewait"));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| SuitewaitError::InvalidInput(format!("Invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SuitewaitError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Append `segments` to the API base, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| SuitewaitError::InvalidInput(format!("Invalid API URL '{}': {}", self.config.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| SuitewaitError::InvalidInput(format!("API URL '{}' cannot take a path", self.config.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a GET and hand back whatever status came with it
    async fn get(&self, url: Url, query: &[(&str, String)]) -> Result<ApiResponse> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok(ApiResponse::new(status, body))
    }
}

#[async_trait]
impl CheckSuiteSource for GitHubClient {
    async fn list_suites_for_ref(&self, target: &RefTarget) -> Result<ApiResponse> {
        let url = self.url(&[
            "repos",
            &target.owner,
            &target.repo,
            "commits",
            &target.git_ref,
            "check-suites",
        ])?;
        self.get(url, &[("per_page", PER_PAGE.to_string())]).await
    }
}

#[async_trait]
impl WorkflowRunSource for GitHubClient {
    async fn get_workflow_run(&self, owner: &str, repo: &str, run_id: u64) -> Result<ApiResponse> {
        let run_id = run_id.to_string();
        let url = self.url(&["repos", owner, repo, "actions", "runs", &run_id])?;
        self.get(url, &[]).await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.config.api_url)
            .field("authenticated", &self.config.token.is_some())
            .finish()
    }
}
