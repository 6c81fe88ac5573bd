//! # triage-config
//!
//! Layered configuration loading for issue triage using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRIAGE_*` prefix, `__` as separator)
//! 2. Conventional variables: `GITHUB_TOKEN`, `GROQ_API_KEY`, `BACKEND_URL`
//! 3. Project-level `./triage.toml`
//! 4. User-level `~/.config/triage/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRIAGE_LLM__MODEL` -> `llm.model`, `TRIAGE_SERVER__PORT` -> `server.port`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use triage_config::TriageConfig;
//!
//! let config = TriageConfig::load_with_dotenv().expect("config");
//! if !config.llm.is_configured() {
//!     eprintln!("set GROQ_API_KEY to enable analysis");
//! }
//! ```

mod error;
mod general;
mod github;
mod llm;

pub use error::ConfigError;
pub use general::{CacheConfig, ServerConfig, UiConfig};
pub use github::GithubConfig;
pub use llm::LlmConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unprefixed variables honoured for compatibility with common tooling,
/// mapped onto their config keys.
const CONVENTIONAL_ENV: [(&str, &str); 3] = [
    ("GITHUB_TOKEN", "github.token"),
    ("GROQ_API_KEY", "llm.api_key"),
    ("BACKEND_URL", "ui.api_base_url"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl TriageConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value fails [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env file is the common case, not an error.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("triage.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Conventional unprefixed variables
        for (var, key) in CONVENTIONAL_ENV {
            figment = figment.merge(Env::raw().only(&[var]).map(move |_| key.into()));
        }

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("TRIAGE_").split("__"))
    }

    /// Reject values that would make the server misbehave at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| {
            Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: reason.to_string(),
            })
        };

        if self.server.port == 0 {
            return invalid("server.port", "must be between 1 and 65535");
        }
        if self.cache.ttl_secs == 0 {
            return invalid("cache.ttl_secs", "must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return invalid("llm.temperature", "must be within 0.0..=2.0");
        }
        if self.github.timeout_secs == 0 {
            return invalid("github.timeout_secs", "must be greater than zero");
        }
        if self.llm.timeout_secs == 0 {
            return invalid("llm.timeout_secs", "must be greater than zero");
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("triage").join("config.toml"))
    }
}
