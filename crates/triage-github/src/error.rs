//! GitHub client error types.

use thiserror::Error;

/// Errors that can occur when resolving a repository or fetching an issue.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The repository URL does not look like a GitHub repository.
    #[error("{0}")]
    InvalidUrl(String),

    /// The issue endpoint answered 404.
    #[error("Issue #{number} not found in {owner}/{repo}")]
    IssueNotFound {
        owner: String,
        repo: String,
        number: u64,
    },

    /// HTTP transport error (connect, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub returned a non-success status code.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by GitHub.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// GitHub refused the request because the rate limit is exhausted.
    #[error("GitHub rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a GitHub response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GithubError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::IssueNotFound { .. })
    }
}
