//! # triage-analyzer
//!
//! Runs the issue analysis pipeline:
//!
//! cache check → URL parse → issue fetch → prompt → model call →
//! validation → cache write.
//!
//! GitHub failures and provider rate limits degrade to fixed results (see
//! [`fallback`]) which are cached like model output. Bad input and other
//! model failures surface as [`AnalyzeError`] and are never cached.

pub mod cache;
pub mod fallback;

mod error;

pub use cache::{TtlCache, generate_key};
pub use error::AnalyzeError;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use triage_core::AnalysisResult;
use triage_github::{IssueSource, parse_repo_url};
use triage_llm::{ChatModel, SYSTEM_PROMPT, build_prompt, parse_analysis};

/// Lifetime of a cached analysis unless overridden with [`IssueAnalyzer::with_ttl`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Where an [`Analysis`] result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Fresh model output.
    Model,
    /// Served from the cache.
    Cache,
    /// GitHub fetch failed; placeholder result.
    IssueUnavailable,
    /// Provider rate limited; exemplar result.
    RateLimited,
}

impl AnalysisSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Cache => "cache",
            Self::IssueUnavailable => "issue_unavailable",
            Self::RateLimited => "rate_limited",
        }
    }

    /// Whether the result is a fixed fallback rather than a real analysis.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::IssueUnavailable | Self::RateLimited)
    }
}

impl fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A result plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
}

/// The analysis pipeline with its collaborators injected.
pub struct IssueAnalyzer {
    issues: Arc<dyn IssueSource>,
    model: Arc<dyn ChatModel>,
    cache: Arc<TtlCache<AnalysisResult>>,
    ttl: Duration,
}

impl IssueAnalyzer {
    #[must_use]
    pub fn new(
        issues: Arc<dyn IssueSource>,
        model: Arc<dyn ChatModel>,
        cache: Arc<TtlCache<AnalysisResult>>,
    ) -> Self {
        Self {
            issues,
            model,
            cache,
            ttl: DEFAULT_TTL,
        }
    }

    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn cache(&self) -> &TtlCache<AnalysisResult> {
        &self.cache
    }

    /// Analyze one issue, serving from the cache when possible.
    ///
    /// # Errors
    ///
    /// - [`AnalyzeError::InvalidIssueNumber`] for issue number 0.
    /// - [`AnalyzeError::InvalidUrl`] when `repo_url` is not a GitHub URL.
    /// - [`AnalyzeError::AnalysisFailed`] when the model call or output
    ///   validation fails for a reason other than rate limiting.
    pub async fn analyze(
        &self,
        repo_url: &str,
        issue_number: u64,
    ) -> Result<Analysis, AnalyzeError> {
        if issue_number == 0 {
            return Err(AnalyzeError::InvalidIssueNumber);
        }

        let key = generate_key(repo_url, issue_number);
        if let Some(result) = self.cache.get(&key) {
            tracing::info!(repo_url, issue_number, "returning cached analysis");
            return Ok(Analysis {
                result,
                source: AnalysisSource::Cache,
            });
        }
        tracing::debug!(repo_url, issue_number, "cache miss");

        let repo = parse_repo_url(repo_url).map_err(|e| AnalyzeError::InvalidUrl(e.to_string()))?;
        tracing::info!(%repo, issue_number, "starting analysis");

        let issue = match self.issues.fetch_issue(&repo, issue_number).await {
            Ok(issue) => issue,
            Err(error) => {
                tracing::warn!(%repo, issue_number, %error, "could not fetch issue; using placeholder analysis");
                return Ok(self.store(key, fallback::issue_unavailable(), AnalysisSource::IssueUnavailable));
            }
        };
        tracing::info!(%repo, issue_number, title = %issue.title, "fetched issue");

        let prompt = build_prompt(&issue);
        let outcome = match self.model.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(text) => parse_analysis(&text),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(result) => {
                tracing::info!(%repo, issue_number, model = self.model.model_name(), "analysis validated");
                Ok(self.store(key, result, AnalysisSource::Model))
            }
            Err(error) if error.is_rate_limited() => {
                tracing::warn!(%repo, issue_number, %error, "model rate limited; using exemplar analysis");
                Ok(self.store(key, fallback::rate_limited(), AnalysisSource::RateLimited))
            }
            Err(error) => {
                tracing::error!(%repo, issue_number, %error, "analysis failed");
                Err(AnalyzeError::AnalysisFailed(error.to_string()))
            }
        }
    }

    fn store(&self, key: String, result: AnalysisResult, source: AnalysisSource) -> Analysis {
        self.cache.set(key, result.clone(), self.ttl);
        Analysis { result, source }
    }
}
