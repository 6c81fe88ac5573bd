use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::IssueState;

/// Snapshot of one GitHub issue, reduced to what the prompt needs.
///
/// Built once by the fetcher and treated as immutable afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssueRecord {
    pub title: String,
    /// Issue body; a `null` body from the API becomes the empty string.
    pub body: String,
    /// Comment bodies in API order.
    pub comments: Vec<String>,
    /// Label names currently applied to the issue.
    pub labels: Vec<String>,
    pub state: IssueState,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl IssueRecord {
    /// True when the issue has description text beyond whitespace.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}
