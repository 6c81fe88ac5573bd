//! # triage-server
//!
//! HTTP surface of issue triage: the JSON API over [`IssueAnalyzer`] plus a
//! single-page web UI. The `triage` binary wires it to configuration and
//! also offers a client mode that calls a running server.

pub mod routes;
pub mod ui;

pub use routes::{ANALYSIS_SOURCE_HEADER, AnalyzeRequest, build_router};

use std::sync::Arc;

use triage_analyzer::IssueAnalyzer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<IssueAnalyzer>,
    ui_page: Arc<str>,
}

impl AppState {
    /// Wrap an analyzer and pre-render the UI page against `api_base_url`.
    #[must_use]
    pub fn new(analyzer: IssueAnalyzer, api_base_url: &str) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            ui_page: ui::render(api_base_url).into(),
        }
    }

    #[must_use]
    pub fn ui_page(&self) -> &str {
        &self.ui_page
    }
}
