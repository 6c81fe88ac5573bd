use std::time::Duration;

use anyhow::{Context, bail};
use serde_json::Value;
use triage_config::TriageConfig;
use triage_llm::response::REQUIRED_FIELDS;
use triage_server::{ANALYSIS_SOURCE_HEADER, AnalyzeRequest};

use crate::cli::AnalyzeArgs;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Handle `triage analyze`: POST to a running server and report the result.
pub async fn handle(args: &AnalyzeArgs, config: &TriageConfig) -> anyhow::Result<()> {
    let repo_url = args.repo_url.trim();
    validate_repo_url(repo_url)?;

    let base = args
        .api_url
        .as_deref()
        .unwrap_or(&config.ui.api_base_url)
        .trim_end_matches('/');
    let endpoint = format!("{base}/analyze");
    tracing::info!(%endpoint, repo_url, issue_number = args.issue_number, "sending analyze request");

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;
    let response = client
        .post(&endpoint)
        .json(&AnalyzeRequest {
            repo_url: repo_url.to_string(),
            issue_number: args.issue_number,
        })
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}; is `triage serve` running?"))?;

    let status = response.status();
    let source = response
        .headers()
        .get(ANALYSIS_SOURCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = response
        .json()
        .await
        .context("server returned a non-JSON body")?;

    if !status.is_success() {
        let detail = body
            .get("detail")
            .and_then(Value::as_str)
            .map_or_else(|| body.to_string(), str::to_string);
        bail!("server returned {status}: {detail}");
    }

    println!("{}", serde_json::to_string_pretty(&body)?);
    if let Some(source) = source {
        println!("\nsource: {source}");
    }
    println!("\nfield validation:");
    for line in field_report(&body) {
        println!("  {line}");
    }
    Ok(())
}

fn validate_repo_url(repo_url: &str) -> anyhow::Result<()> {
    if repo_url.is_empty() {
        bail!("repository URL is required");
    }
    if !repo_url.contains("github.com") {
        bail!("repository URL must be a GitHub URL");
    }
    Ok(())
}

fn field_report(body: &Value) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .map(|field| {
            if body.get(field).is_some() {
                format!("ok      {field}")
            } else {
                format!("MISSING {field}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_non_github_urls() {
        assert!(validate_repo_url("").is_err());
        assert!(validate_repo_url("https://gitlab.com/a/b").is_err());
        assert!(validate_repo_url("https://github.com/a/b").is_ok());
    }

    #[test]
    fn field_report_flags_missing_fields() {
        let body = json!({"summary": "s", "type": "bug"});
        let report = field_report(&body);
        assert_eq!(report.len(), REQUIRED_FIELDS.len());
        assert!(report.contains(&"ok      summary".to_string()));
        assert!(report.contains(&"MISSING reasoning".to_string()));
    }
}
