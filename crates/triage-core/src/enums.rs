//! Closed enums for issue classification and issue lifecycle state.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// IssueType
// ---------------------------------------------------------------------------

/// Classification assigned to an issue by the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Bug,
    FeatureRequest,
    Documentation,
    Question,
    Other,
}

impl IssueType {
    /// Every canonical value, in the order the prompt lists them.
    pub const ALL: [Self; 5] = [
        Self::Bug,
        Self::FeatureRequest,
        Self::Documentation,
        Self::Question,
        Self::Other,
    ];

    /// Return the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::FeatureRequest => "feature_request",
            Self::Documentation => "documentation",
            Self::Question => "question",
            Self::Other => "other",
        }
    }

    /// Parse a wire value, returning `None` for anything non-canonical.
    ///
    /// Matching is exact: `"Bug"` or `"feature-request"` are not canonical.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IssueState
// ---------------------------------------------------------------------------

/// GitHub issue state. Absent values default to `open`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_type_parse_accepts_only_canonical_values() {
        for t in IssueType::ALL {
            assert_eq!(IssueType::parse(t.as_str()), Some(t));
        }
        assert_eq!(IssueType::parse("Bug"), None);
        assert_eq!(IssueType::parse("feature-request"), None);
        assert_eq!(IssueType::parse(""), None);
    }

    #[test]
    fn issue_type_serializes_snake_case() {
        let json = serde_json::to_string(&IssueType::FeatureRequest).unwrap();
        assert_eq!(json, "\"feature_request\"");
    }

    #[test]
    fn issue_state_defaults_to_open() {
        assert_eq!(IssueState::default(), IssueState::Open);
        let state: IssueState = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(state.to_string(), "closed");
    }
}
