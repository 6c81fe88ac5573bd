//! LLM error types.

use thiserror::Error;

/// Substrings (matched case-insensitively) that mark a provider failure as a
/// rate or quota condition.
const RATE_LIMIT_MARKERS: [&str; 3] = ["429", "quota", "rate"];

/// Errors from calling the model or interpreting its output.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider is not configured (missing API key).
    #[error(transparent)]
    Config(#[from] triage_config::ConfigError),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Provider answered 429 Too Many Requests.
    #[error("provider returned 429, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Provider answered without any completion choice or content.
    #[error("provider returned no completion content")]
    EmptyResponse,

    /// No JSON object could be extracted from the model output.
    #[error("{0}")]
    MalformedResponse(String),

    /// The extracted JSON lacks required fields or has mistyped ones.
    #[error("{}", describe_violation(.missing, .errors))]
    SchemaViolation {
        /// Required fields absent from the object.
        missing: Vec<String>,
        /// Type errors reported by schema validation.
        errors: Vec<String>,
    },
}

impl LlmError {
    /// Whether this failure looks like a provider rate limit or quota
    /// exhaustion: a typed 429, or a provider error text mentioning "429",
    /// "quota" or "rate" in any case.
    ///
    /// Output errors never qualify; their text quotes model-written values.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { .. } | Self::Http(_) => {
                let message = self.to_string().to_lowercase();
                RATE_LIMIT_MARKERS.iter().any(|m| message.contains(m))
            }
            Self::Config(_)
            | Self::EmptyResponse
            | Self::MalformedResponse(_)
            | Self::SchemaViolation { .. } => false,
        }
    }
}

fn describe_violation(missing: &[String], errors: &[String]) -> String {
    if missing.is_empty() {
        format!("Invalid field types in model output: {}", errors.join("; "))
    } else {
        format!("Missing required fields: {}", missing.join(", "))
    }
}
