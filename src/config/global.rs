//! Global configuration.
//!
//! Loaded from ~/.config/suitewait/suitewait.yml or .suitewait.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::github::{DEFAULT_API_URL, GitHubConfig};

/// Global configuration for Suitewait.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// GitHub API settings.
    pub github: GitHubSettings,

    /// Polling defaults, overridable per invocation.
    pub polling: PollingSettings,
}

impl GlobalConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .suitewait.yml in current directory
    /// 3. ~/.config/suitewait/suitewait.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".suitewait.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .suitewait.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .suitewait.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("suitewait").join("suitewait.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.github.request_timeout_ms == 0 {
            eyre::bail!("github.request-timeout-ms must be > 0");
        }
        if !(self.polling.interval_seconds.is_finite() && self.polling.interval_seconds > 0.0) {
            eyre::bail!("polling.interval-seconds must be > 0");
        }
        Ok(())
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// REST API base URL (GitHub Enterprise installs differ).
    #[serde(rename = "api-url")]
    pub api_url: String,

    /// Environment variable holding the token when none is passed.
    #[serde(rename = "token-env")]
    pub token_env: String,

    /// Timeout per HTTP request in milliseconds.
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl GitHubSettings {
    /// Client configuration; `token` wins over the configured env var.
    pub fn client_config(&self, token: Option<String>) -> GitHubConfig {
        let token = token
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(&self.token_env).ok().filter(|t| !t.is_empty()));

        let config = GitHubConfig::default()
            .with_api_url(self.api_url.clone())
            .with_timeout(Duration::from_millis(self.request_timeout_ms));

        match token {
            Some(token) => config.with_token(token),
            None => {
                log::warn!("No GitHub token configured; requests are unauthenticated");
                config
            }
        }
    }
}

/// Polling defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingSettings {
    /// Seconds between polls.
    #[serde(rename = "interval-seconds")]
    pub interval_seconds: f64,

    /// Overall timeout in seconds; absent or non-positive waits forever.
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: Option<f64>,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_seconds: 15.0,
            timeout_seconds: None,
        }
    }
}
