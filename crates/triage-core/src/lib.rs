//! # triage-core
//!
//! Domain types shared by every issue-triage crate:
//! - [`IssueRecord`]: the issue snapshot fetched from GitHub and fed to the prompt
//! - [`AnalysisResult`]: the validated classification returned to callers
//! - [`IssueType`] / [`IssueState`]: closed enums with `snake_case` serialization

pub mod analysis;
pub mod enums;
pub mod issue;

pub use analysis::AnalysisResult;
pub use enums::{IssueState, IssueType};
pub use issue::IssueRecord;
