//! Analyzer error types.

use thiserror::Error;

/// Terminal failures of [`IssueAnalyzer::analyze`](crate::IssueAnalyzer::analyze).
///
/// Degraded outcomes (GitHub unavailable, provider rate limited) are not
/// errors; they are reported through [`AnalysisSource`](crate::AnalysisSource).
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The repository URL is not a recognizable GitHub URL.
    #[error("{0}")]
    InvalidUrl(String),

    /// Issue numbers start at 1.
    #[error("Issue number must be a positive integer")]
    InvalidIssueNumber,

    /// The model call or output validation failed for a reason other than
    /// rate limiting.
    #[error("Failed to generate analysis: {0}")]
    AnalysisFailed(String),
}

impl AnalyzeError {
    /// Whether the caller supplied bad input (as opposed to an upstream failure).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::InvalidIssueNumber)
    }
}
