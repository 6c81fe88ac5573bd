//! Issue + comments fetching against the GitHub REST v3 API.

use chrono::{DateTime, Utc};
use triage_core::{IssueRecord, IssueState};

use crate::{
    GithubClient, RepoRef,
    error::GithubError,
    http::{check_response, read_json},
};

/// Upper bound on comments kept per issue (GitHub's default page size).
pub const MAX_COMMENTS: usize = 30;

#[derive(serde::Deserialize)]
struct ApiIssue {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    labels: Vec<ApiLabel>,
    #[serde(default)]
    state: Option<IssueState>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(serde::Deserialize)]
struct ApiLabel {
    #[serde(default)]
    name: Option<String>,
}

#[derive(serde::Deserialize)]
struct ApiComment {
    #[serde(default)]
    body: Option<String>,
}

impl ApiIssue {
    fn into_record(self, comments: Vec<ApiComment>) -> IssueRecord {
        IssueRecord {
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            comments: comments
                .into_iter()
                .take(MAX_COMMENTS)
                .map(|c| c.body.unwrap_or_default())
                .collect(),
            labels: self
                .labels
                .into_iter()
                .map(|l| l.name.unwrap_or_default())
                .collect(),
            state: self.state.unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl GithubClient {
    /// Fetch one issue and its comments.
    ///
    /// The comments request is best effort: any failure is logged and the
    /// issue is returned with an empty comment list.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::IssueNotFound`] when GitHub answers 404 for the
    /// issue, and any other [`GithubError`] when the issue request fails.
    pub async fn fetch_issue_record(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<IssueRecord, GithubError> {
        let url = self.issue_url(repo, number);
        let resp = self.get(&url).send().await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GithubError::IssueNotFound {
                owner: repo.owner.clone(),
                repo: repo.repo.clone(),
                number,
            });
        }
        let issue: ApiIssue = read_json(check_response(resp).await?).await?;

        let comments = match self.fetch_comments(repo, number).await {
            Ok(comments) => comments,
            Err(e) => {
                tracing::warn!(%repo, issue_number = number, %e, "failed to fetch comments");
                Vec::new()
            }
        };

        let record = issue.into_record(comments);
        tracing::debug!(
            %repo,
            issue_number = number,
            comments = record.comments.len(),
            labels = record.labels.len(),
            "fetched issue"
        );
        Ok(record)
    }

    async fn fetch_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<ApiComment>, GithubError> {
        let url = format!("{}/comments", self.issue_url(repo, number));
        let resp = check_response(self.get(&url).send().await?).await?;
        read_json(resp).await
    }

    fn issue_url(&self, repo: &RepoRef, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{number}",
            self.api_url,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.repo)
        )
    }
}
