//! Prompt construction for issue analysis.

use std::fmt::Write as _;

use triage_core::IssueRecord;

/// System message sent alongside every analysis prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that analyzes GitHub issues and returns only valid JSON responses.";

/// Comments included in the prompt.
pub const PROMPT_COMMENT_LIMIT: usize = 5;

/// Characters kept from each included comment.
pub const PROMPT_COMMENT_CHARS: usize = 200;

const OUTPUT_SCHEMA: &str = r#"{
  "summary": "A concise one-sentence summary of the main problem or request",
  "type": "One of: bug, feature_request, documentation, question, or other",
  "priority_score": "A score from 1 (low) to 5 (critical), formatted as 'X/5: justification'",
  "suggested_labels": ["label1", "label2", "label3"],
  "potential_impact": "A brief sentence on user impact (especially for bugs)",
  "reasoning": "Short paragraph explaining why you chose the type, priority, and labels"
}"#;

const INSTRUCTIONS: &str = r#"IMPORTANT:
- Return ONLY the JSON object, no additional text
- Do not wrap the JSON in markdown code fences
- Ensure priority_score is a string like "3/5: Medium priority due to..."
- suggested_labels should be 2-3 relevant GitHub labels
- Be specific and actionable in your analysis
- reasoning must be concise (2-4 sentences)"#;

/// Render an issue into the user prompt.
///
/// Includes the title, the body (or a placeholder), the first
/// [`PROMPT_COMMENT_LIMIT`] comments cut to [`PROMPT_COMMENT_CHARS`]
/// characters, the existing labels, and the JSON shape the model must return.
#[must_use]
pub fn build_prompt(issue: &IssueRecord) -> String {
    let comments = issue
        .comments
        .iter()
        .take(PROMPT_COMMENT_LIMIT)
        .map(|c| format!("- {}", truncate_chars(c, PROMPT_COMMENT_CHARS)))
        .collect::<Vec<_>>()
        .join("\n");

    let body = if issue.has_body() {
        issue.body.as_str()
    } else {
        "No description provided"
    };
    let comments = if comments.is_empty() {
        "No comments yet"
    } else {
        comments.as_str()
    };
    let labels = if issue.labels.is_empty() {
        "None".to_string()
    } else {
        issue.labels.join(", ")
    };

    let mut prompt = String::with_capacity(body.len() + comments.len() + 1024);
    let _ = write!(
        prompt,
        "Analyze the following GitHub issue and provide a structured analysis with an explicit reasoning trail.

ISSUE TITLE: {title}

ISSUE BODY:
{body}

COMMENTS (first {PROMPT_COMMENT_LIMIT}):
{comments}

EXISTING LABELS: {labels}

Based on this information, analyze the issue and respond with ONLY a valid JSON object (no markdown, no extra text) with the following structure:
{OUTPUT_SCHEMA}

{INSTRUCTIONS}",
        title = issue.title,
    );
    prompt
}

/// First `max` characters of `text`, never splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
