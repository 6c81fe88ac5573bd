use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use triage_analyzer::{IssueAnalyzer, TtlCache};
use triage_config::TriageConfig;
use triage_github::GithubClient;
use triage_llm::ChatClient;

pub fn load_config() -> anyhow::Result<TriageConfig> {
    TriageConfig::load_with_dotenv().context("failed to load triage configuration")
}

/// Wire the GitHub client, the model client and a fresh cache into an analyzer.
///
/// Fails when the LLM provider has no API key.
pub fn build_analyzer(config: &TriageConfig) -> anyhow::Result<IssueAnalyzer> {
    let issues = GithubClient::new(&config.github).context("failed to build GitHub client")?;
    let model = ChatClient::new(&config.llm).context("failed to build LLM client")?;

    Ok(IssueAnalyzer::new(
        Arc::new(issues),
        Arc::new(model),
        Arc::new(TtlCache::new()),
    )
    .with_ttl(Duration::from_secs(config.cache.ttl_secs)))
}
