//! Serde roundtrip and JsonSchema validation tests for the domain types.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use triage_core::{AnalysisResult, IssueRecord, IssueState, IssueType};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        summary: "Render crashes with legacy context".into(),
        issue_type: IssueType::Bug,
        priority_score: "4/5: crashes for concurrent users".into(),
        suggested_labels: vec!["bug".into(), "crash".into()],
        potential_impact: "Apps crash during render".into(),
        reasoning: "Stack trace shows a crash in render.".into(),
    }
}

#[test]
fn analysis_result_roundtrips_and_matches_schema() {
    let analysis = sample_analysis();
    let json = serde_json::to_value(&analysis).unwrap();
    let recovered: AnalysisResult = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(recovered, analysis);

    let schema = serde_json::to_value(schema_for!(AnalysisResult)).unwrap();
    let errors = validate_against_schema(&schema, &json);
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}

#[test]
fn analysis_schema_rejects_unknown_type_and_too_many_labels() {
    let schema = serde_json::to_value(schema_for!(AnalysisResult)).unwrap();
    let mut json = serde_json::to_value(sample_analysis()).unwrap();
    json["type"] = "nonsense".into();
    json["suggested_labels"] = serde_json::json!(["a", "b", "c", "d"]);

    let errors = validate_against_schema(&schema, &json);
    assert_eq!(errors.len(), 2, "errors: {errors:?}");
}

#[test]
fn analysis_schema_requires_every_field() {
    let schema = serde_json::to_value(schema_for!(AnalysisResult)).unwrap();
    let required: Vec<&str> = schema["required"]
        .as_array()
        .expect("required list")
        .iter()
        .filter_map(serde_json::Value::as_str)
        .collect();
    for field in [
        "summary",
        "type",
        "priority_score",
        "suggested_labels",
        "potential_impact",
        "reasoning",
    ] {
        assert!(required.contains(&field), "{field} should be required");
    }
}

#[test]
fn issue_record_roundtrips_with_timestamps() {
    let record = IssueRecord {
        title: "Crash".into(),
        body: String::new(),
        comments: vec!["me too".into()],
        labels: vec!["bug".into()],
        state: IssueState::Closed,
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        updated_at: None,
    };
    let json = serde_json::to_string(&record).unwrap();
    let recovered: IssueRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, record);
    assert!(!recovered.has_body());
}
