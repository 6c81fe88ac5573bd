//! GitHub REST API configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    String::from("https://api.github.com")
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Personal access token. Optional: anonymous requests work but hit
    /// the lower unauthenticated rate limit.
    #[serde(default)]
    pub token: String,

    /// REST API root (override for GitHub Enterprise).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GithubConfig {
    /// The token, if one is configured.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_anonymous() {
        let config = GithubConfig::default();
        assert!(config.token().is_none());
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let config = GithubConfig {
            token: "   ".into(),
            ..Default::default()
        };
        assert!(config.token().is_none());
    }
}
