//! Router and request handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use triage_analyzer::AnalyzeError;

use crate::AppState;

/// Response header naming where the analysis came from
/// (`model`, `cache`, `issue_unavailable` or `rate_limited`).
pub const ANALYSIS_SOURCE_HEADER: &str = "x-analysis-source";

const SERVICE_NAME: &str = "GitHub Issue Assistant API";

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub repo_url: String,
    pub issue_number: u64,
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .route("/ui", get(ui_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": format!("{SERVICE_NAME} is running"),
    }))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn ui_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.ui_page().to_string())
}

async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(status = %rejection.status(), "rejected analyze request body");
        ApiError::bad_request(rejection.body_text())
    })?;

    tracing::info!(
        repo_url = %request.repo_url,
        issue_number = request.issue_number,
        "analyzing issue"
    );
    let analysis = state
        .analyzer
        .analyze(&request.repo_url, request.issue_number)
        .await?;

    Ok((
        [(ANALYSIS_SOURCE_HEADER, analysis.source.as_str())],
        Json(analysis.result),
    )
        .into_response())
}

/// `{detail}` error body with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        if err.is_client_error() {
            tracing::warn!(error = %err, "validation error");
            Self::bad_request(err.to_string())
        } else {
            tracing::error!(error = %err, "unexpected error");
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: err.to_string(),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
