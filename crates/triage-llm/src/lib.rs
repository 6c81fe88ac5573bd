//! # triage-llm
//!
//! The model-facing half of the analysis pipeline:
//! - [`build_prompt`]: render an [`IssueRecord`](triage_core::IssueRecord) into the user prompt
//! - [`ChatModel`] / [`ChatClient`]: one chat completion against an
//!   OpenAI-compatible provider
//! - [`parse_analysis`]: extract, repair and validate the model's JSON

pub mod client;
pub mod prompt;
pub mod response;

mod error;

pub use client::ChatClient;
pub use error::LlmError;
pub use prompt::{SYSTEM_PROMPT, build_prompt};
pub use response::{DEFAULT_REASONING, parse_analysis};

use async_trait::async_trait;

/// A provider that turns a system + user prompt into completion text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion and return the raw text of the first choice.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
