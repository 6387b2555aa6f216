//! Agent service configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AgentError, AgentResult};

/// Agent service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL; `/upload` and `/agent` are appended.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Bearer token sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Limit for a whole compliance-check run in seconds.
    #[serde(default)]
    pub check_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_request_timeout() -> u64 {
    300
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            api_key: None,
            request_timeout_secs: default_request_timeout(),
            check_timeout_secs: None,
        }
    }
}

impl AgentConfig {
    /// Config pointing at `base_url` with default timeouts.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AgentResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AgentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AgentError::config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        info!(path = %path.display(), base_url = %config.api_base_url, "Loaded agent config");
        Ok(config)
    }

    /// Checks the base URL scheme and the timeouts.
    pub fn validate(&self) -> AgentResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AgentError::config(format!(
                "api_base_url must start with http:// or https://, got '{url}'"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(AgentError::config("request_timeout_secs must be positive"));
        }
        if self.check_timeout_secs == Some(0) {
            return Err(AgentError::config("check_timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    /// Per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whole-run limit, if any.
    #[must_use]
    pub fn check_timeout(&self) -> Option<Duration> {
        self.check_timeout_secs.map(Duration::from_secs)
    }
}
