//! Repository URL parsing.
//!
//! Accepts `https://github.com/OWNER/REPO[.git][/]` and
//! `git@github.com:OWNER/REPO[.git]`, with surrounding whitespace.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::GithubError;

static REPO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[:/]([^/]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("repository pattern should compile")
});

/// Owner/name pair identifying one GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Extract the owner and repository name from a GitHub URL.
///
/// One trailing `.git` is stripped before matching; the pattern then
/// tolerates a further `.git` and a trailing slash.
///
/// # Errors
///
/// Returns [`GithubError::InvalidUrl`] when the input does not contain
/// `github.com` followed by an owner and repository segment.
pub fn parse_repo_url(repo_url: &str) -> Result<RepoRef, GithubError> {
    let trimmed = repo_url.trim();
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let caps = REPO_PATTERN.captures(trimmed).ok_or_else(|| {
        GithubError::InvalidUrl(
            "Invalid GitHub URL format. Expected: https://github.com/owner/repo".to_string(),
        )
    })?;

    Ok(RepoRef {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    })
}
