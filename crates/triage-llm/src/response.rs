//! Extraction, repair and validation of model output.
//!
//! Model output is free-form text that should contain one JSON object,
//! sometimes wrapped in prose or markdown fences. [`parse_analysis`] pulls the
//! object out, applies a fixed sequence of repairs, checks the result against
//! the [`AnalysisResult`] JSON Schema and deserializes it.

use std::sync::LazyLock;

use schemars::schema_for;
use serde_json::{Map, Value};
use triage_core::{AnalysisResult, IssueType, analysis::MAX_SUGGESTED_LABELS};

use crate::error::LlmError;

/// Injected when the model omits `reasoning`.
pub const DEFAULT_REASONING: &str =
    "Reasoning not returned by model; defaulting to summary rationale.";

/// Fields that must be present after the `reasoning` default is applied.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "summary",
    "type",
    "priority_score",
    "suggested_labels",
    "potential_impact",
    "reasoning",
];

static ANALYSIS_VALIDATOR: LazyLock<jsonschema::Validator> = LazyLock::new(|| {
    let schema = serde_json::to_value(schema_for!(AnalysisResult))
        .expect("schemars output should serialize");
    jsonschema::validator_for(&schema).expect("AnalysisResult schema should compile")
});

/// Span from the first `{` to the last `}` in `raw`.
///
/// Deliberately greedy and not nesting-aware: prose containing several
/// brace-delimited fragments yields a span that fails to parse.
#[must_use]
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Turn raw model output into a validated [`AnalysisResult`].
///
/// Repairs, in order: default `reasoning` when absent; fail on other
/// missing fields; coerce a non-canonical `type` to `other`; wrap a
/// non-array `suggested_labels` into a one-element array; keep at most
/// three labels.
///
/// # Errors
///
/// - [`LlmError::MalformedResponse`] when no `{...}` span exists or it is
///   not a JSON object.
/// - [`LlmError::SchemaViolation`] when required fields are missing or a
///   field has the wrong JSON type.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, LlmError> {
    let span = extract_json_span(raw).ok_or_else(|| {
        LlmError::MalformedResponse("Could not extract JSON from model output".to_string())
    })?;
    let mut data: Map<String, Value> = serde_json::from_str(span)
        .map_err(|e| LlmError::MalformedResponse(format!("Invalid JSON in model output: {e}")))?;

    if data.get("reasoning").is_none_or(Value::is_null) {
        data.insert(
            "reasoning".to_string(),
            Value::String(DEFAULT_REASONING.to_string()),
        );
    }

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|f| !data.contains_key(**f))
        .map(|f| (*f).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LlmError::SchemaViolation {
            missing,
            errors: Vec::new(),
        });
    }

    let canonical_type = data
        .get("type")
        .and_then(Value::as_str)
        .and_then(IssueType::parse);
    if canonical_type.is_none() {
        tracing::debug!(raw_type = %data["type"], "coercing non-canonical issue type to other");
        data.insert("type".to_string(), Value::String(IssueType::Other.to_string()));
    }

    let labels = match data.remove("suggested_labels") {
        Some(Value::Array(mut labels)) => {
            labels.truncate(MAX_SUGGESTED_LABELS);
            labels
        }
        Some(Value::String(label)) => vec![Value::String(label)],
        Some(other) => vec![Value::String(other.to_string())],
        None => Vec::new(),
    };
    data.insert("suggested_labels".to_string(), Value::Array(labels));

    let instance = Value::Object(data);
    let errors: Vec<String> = ANALYSIS_VALIDATOR
        .iter_errors(&instance)
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(LlmError::SchemaViolation {
            missing: Vec::new(),
            errors,
        });
    }

    serde_json::from_value(instance).map_err(|e| LlmError::SchemaViolation {
        missing: Vec::new(),
        errors: vec![e.to_string()],
    })
}
