use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::IssueType;

/// Upper bound on `suggested_labels`.
pub const MAX_SUGGESTED_LABELS: usize = 3;

/// Structured classification of one issue.
///
/// Produced either from validated model output or from one of the fixed
/// degraded payloads, then cached and returned to the caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalysisResult {
    /// One-sentence summary of the problem or request.
    pub summary: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Free-form `"<1-5>/5: <justification>"` string, kept verbatim.
    pub priority_score: String,
    #[schemars(length(max = 3))]
    pub suggested_labels: Vec<String>,
    pub potential_impact: String,
    pub reasoning: String,
}

impl AnalysisResult {
    /// Leading score of `priority_score` when it parses as `N/5` with `N` in `1..=5`.
    ///
    /// ```
    /// # use triage_core::{AnalysisResult, IssueType};
    /// let mut result = AnalysisResult {
    ///     summary: String::new(),
    ///     issue_type: IssueType::Bug,
    ///     priority_score: "4/5: crashes on startup".into(),
    ///     suggested_labels: vec![],
    ///     potential_impact: String::new(),
    ///     reasoning: String::new(),
    /// };
    /// assert_eq!(result.priority_level(), Some(4));
    /// result.priority_score = "high".into();
    /// assert_eq!(result.priority_level(), None);
    /// ```
    #[must_use]
    pub fn priority_level(&self) -> Option<u8> {
        let (score, _) = self.priority_score.split_once('/')?;
        let score: u8 = score.trim().parse().ok()?;
        (1..=5).contains(&score).then_some(score)
    }
}
