//! Pipeline behavior with in-process doubles for GitHub and the model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use triage_analyzer::{
    AnalysisSource, AnalyzeError, IssueAnalyzer, TtlCache, fallback, generate_key,
};
use triage_core::{AnalysisResult, IssueRecord, IssueType};
use triage_github::{GithubError, IssueSource, RepoRef};
use triage_llm::{ChatModel, DEFAULT_REASONING, LlmError};

const REACT: &str = "https://github.com/facebook/react";

const MODEL_OUTPUT: &str = r#"Sure! {"summary":"Crash when saving","type":"bug","priority_score":"4/5: data loss","suggested_labels":["bug","editor","crash","extra"],"potential_impact":"Users lose work"}"#;

#[derive(Default)]
struct FakeIssues {
    calls: AtomicUsize,
    fail: bool,
    seen: Mutex<Vec<(RepoRef, u64)>>,
}

impl FakeIssues {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueSource for FakeIssues {
    async fn fetch_issue(&self, repo: &RepoRef, number: u64) -> Result<IssueRecord, GithubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((repo.clone(), number));
        if self.fail {
            return Err(GithubError::Api {
                status: 503,
                message: "connection refused".into(),
            });
        }
        Ok(IssueRecord {
            title: "Editor crashes on save".into(),
            body: "Press ctrl+s".into(),
            comments: vec!["same here".into()],
            labels: vec!["bug".into()],
            ..IssueRecord::default()
        })
    }
}

enum Reply {
    Text(&'static str),
    Fail(fn() -> LlmError),
}

struct FakeModel {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok((*text).to_string()),
            Reply::Fail(make) => Err(make()),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

fn analyzer(issues: &Arc<FakeIssues>, model: &Arc<FakeModel>) -> IssueAnalyzer {
    IssueAnalyzer::new(
        issues.clone(),
        model.clone(),
        Arc::new(TtlCache::<AnalysisResult>::new()),
    )
}

#[tokio::test]
async fn model_result_is_validated_and_cached() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Text(MODEL_OUTPUT)));
    let analyzer = analyzer(&issues, &model);

    let first = analyzer.analyze(REACT, 42).await.unwrap();
    assert_eq!(first.source, AnalysisSource::Model);
    assert_eq!(first.result.issue_type, IssueType::Bug);
    assert_eq!(first.result.suggested_labels, vec!["bug", "editor", "crash"]);
    assert_eq!(first.result.reasoning, DEFAULT_REASONING);

    let second = analyzer.analyze(REACT, 42).await.unwrap();
    assert_eq!(second.source, AnalysisSource::Cache);
    assert_eq!(second.result, first.result);
    assert_eq!(issues.calls(), 1);
    assert_eq!(model.calls(), 1);

    let (repo, number) = issues.seen.lock().unwrap()[0].clone();
    assert_eq!(repo.to_string(), "facebook/react");
    assert_eq!(number, 42);
    assert!(model.prompts.lock().unwrap()[0].contains("Editor crashes on save"));
}

#[tokio::test]
async fn unreachable_github_degrades_once() {
    let issues = Arc::new(FakeIssues::failing());
    let model = Arc::new(FakeModel::new(Reply::Text(MODEL_OUTPUT)));
    let analyzer = analyzer(&issues, &model);

    let first = analyzer.analyze(REACT, 1).await.unwrap();
    let second = analyzer.analyze(REACT, 1).await.unwrap();

    assert_eq!(first.source, AnalysisSource::IssueUnavailable);
    assert!(first.source.is_degraded());
    assert_eq!(first.result, fallback::issue_unavailable());
    assert_eq!(second.result, first.result);
    assert_eq!(second.source, AnalysisSource::Cache);
    assert_eq!(issues.calls(), 1, "GitHub contacted at most once");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn rate_limited_model_serves_cached_exemplar() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Fail(|| LlmError::RateLimited {
        retry_after_secs: 30,
    })));
    let analyzer = analyzer(&issues, &model);

    let first = analyzer.analyze(REACT, 5).await.unwrap();
    assert_eq!(first.source, AnalysisSource::RateLimited);
    assert_eq!(first.result, fallback::rate_limited());

    let second = analyzer.analyze(REACT, 5).await.unwrap();
    assert_eq!(second.source, AnalysisSource::Cache);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn quota_text_counts_as_rate_limited() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Fail(|| LlmError::Api {
        status: 400,
        message: "You exceeded your current QUOTA".into(),
    })));
    let analyzer = analyzer(&issues, &model);

    let analysis = analyzer.analyze(REACT, 5).await.unwrap();
    assert_eq!(analysis.source, AnalysisSource::RateLimited);
}

#[tokio::test]
async fn other_model_failures_are_not_cached() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Fail(|| LlmError::Api {
        status: 500,
        message: "internal error".into(),
    })));
    let analyzer = analyzer(&issues, &model);

    let err = analyzer.analyze(REACT, 9).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::AnalysisFailed(_)));
    assert!(!err.is_client_error());
    assert!(analyzer.cache().is_empty());

    analyzer.analyze(REACT, 9).await.unwrap_err();
    assert_eq!(model.calls(), 2, "failures are retried on the next request");
}

#[tokio::test]
async fn invalid_model_output_fails_with_missing_field() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Text(
        r#"{"type":"bug","priority_score":"3/5","suggested_labels":[],"potential_impact":"x"}"#,
    )));
    let analyzer = analyzer(&issues, &model);

    let err = analyzer.analyze(REACT, 3).await.unwrap_err();
    assert!(err.to_string().contains("summary"), "{err}");
    assert!(analyzer.cache().is_empty());
}

#[tokio::test]
async fn mistyped_output_quoting_rate_words_is_not_rate_limited() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Text(
        r#"{"summary":"s","type":"bug","priority_score":"3/5: x","suggested_labels":["a"],"potential_impact":["moderate slowdown"]}"#,
    )));
    let analyzer = analyzer(&issues, &model);

    let err = analyzer.analyze(REACT, 4).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::AnalysisFailed(_)), "{err}");
    assert!(analyzer.cache().is_empty());
}

#[tokio::test]
async fn invalid_url_is_a_client_error_and_not_cached() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Text(MODEL_OUTPUT)));
    let analyzer = analyzer(&issues, &model);

    let err = analyzer
        .analyze("https://gitlab.com/owner/repo", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::InvalidUrl(_)));
    assert!(err.is_client_error());
    assert!(err.to_string().contains("https://github.com/owner/repo"));
    assert!(analyzer.cache().is_empty());
    assert_eq!(issues.calls(), 0);
}

#[tokio::test]
async fn issue_number_zero_is_rejected() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Text(MODEL_OUTPUT)));
    let analyzer = analyzer(&issues, &model);

    let err = analyzer.analyze(REACT, 0).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::InvalidIssueNumber));
    assert_eq!(issues.calls(), 0);
}

#[tokio::test]
async fn cache_key_uses_raw_url() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Text(MODEL_OUTPUT)));
    let analyzer = analyzer(&issues, &model);

    analyzer.analyze(REACT, 1).await.unwrap();
    let trailing = analyzer.analyze(&format!("{REACT}/"), 1).await.unwrap();

    assert_eq!(trailing.source, AnalysisSource::Model);
    assert_eq!(issues.calls(), 2);
    assert!(analyzer.cache().get(&generate_key(REACT, 1)).is_some());
}

#[tokio::test(start_paused = true)]
async fn cached_result_expires_after_ttl() {
    let issues = Arc::new(FakeIssues::default());
    let model = Arc::new(FakeModel::new(Reply::Text(MODEL_OUTPUT)));
    let analyzer = analyzer(&issues, &model).with_ttl(Duration::from_secs(60));

    analyzer.analyze(REACT, 1).await.unwrap();
    tokio::time::advance(Duration::from_secs(59)).await;
    assert_eq!(
        analyzer.analyze(REACT, 1).await.unwrap().source,
        AnalysisSource::Cache
    );

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(
        analyzer.analyze(REACT, 1).await.unwrap().source,
        AnalysisSource::Model
    );
    assert_eq!(model.calls(), 2);
}
