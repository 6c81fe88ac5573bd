//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be read into [`crate::TriageConfig`].
    #[error("invalid configuration source: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the requested operation lacks its credentials.
    #[error("[{section}] is not configured; {hint}")]
    NotConfigured { section: String, hint: String },

    /// A value is present but outside its accepted range.
    #[error("{field} {reason}")]
    InvalidValue { field: String, reason: String },
}
