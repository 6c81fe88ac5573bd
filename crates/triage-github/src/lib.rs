//! # triage-github
//!
//! GitHub access for issue triage:
//! - [`parse_repo_url`]: turn a user-supplied repository URL into a [`RepoRef`]
//! - [`GithubClient`]: fetch one issue plus its comments over the REST v3 API
//! - [`IssueSource`]: the seam the analyzer depends on, so it can run
//!   against test doubles

pub mod issues;
pub mod repo_url;

mod error;
mod http;

pub use error::GithubError;
pub use repo_url::{RepoRef, parse_repo_url};

use std::time::Duration;

use async_trait::async_trait;
use triage_config::GithubConfig;
use triage_core::IssueRecord;

/// Media type pinning the REST v3 representation.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("issue-triage/", env!("CARGO_PKG_VERSION"));

// ── Source trait ───────────────────────────────────────────────────

/// Anything that can produce an [`IssueRecord`] for a repository issue.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch the issue and (best effort) its comments.
    async fn fetch_issue(&self, repo: &RepoRef, number: u64) -> Result<IssueRecord, GithubError>;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the GitHub REST API.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    /// Build a client from configuration.
    ///
    /// A missing token is not an error; requests are then anonymous and
    /// subject to GitHub's lower unauthenticated rate limit.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let token = config.token().map(str::to_string);
        if token.is_none() {
            tracing::info!("no GitHub token configured; using anonymous API access");
        }
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl IssueSource for GithubClient {
    async fn fetch_issue(&self, repo: &RepoRef, number: u64) -> Result<IssueRecord, GithubError> {
        self.fetch_issue_record(repo, number).await
    }
}
