//! LLM provider configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Groq's OpenAI-compatible endpoint.
fn default_base_url() -> String {
    String::from("https://api.groq.com/openai/v1")
}

fn default_model() -> String {
    String::from("llama-3.3-70b-versatile")
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    1000
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Provider API key. Required to serve analyses.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of an OpenAI-compatible chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Check if the API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Return the API key or fail with [`ConfigError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured { section: "llm" }` when no key is set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(self.api_key.trim())
        } else {
            Err(ConfigError::NotConfigured {
                section: "llm".to_string(),
                hint: "set GROQ_API_KEY or TRIAGE_LLM__API_KEY".to_string(),
            })
        }
    }
}
