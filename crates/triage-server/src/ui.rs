//! The static analysis page served at `/ui`.

const TEMPLATE: &str = include_str!("../static/index.html");

const API_BASE_PLACEHOLDER: &str = "\"__API_BASE_URL__\"";

/// The UI page with `api_base_url` embedded as a JavaScript string literal.
#[must_use]
pub fn render(api_base_url: &str) -> String {
    let base = api_base_url.trim_end_matches('/');
    let literal = serde_json::to_string(base)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");
    TEMPLATE.replace(API_BASE_PLACEHOLDER, &literal)
}
