//! Status and body handling shared by every GitHub request.
//!
//! GitHub signals an exhausted quota either with 429 or with 403 plus
//! `X-RateLimit-Remaining: 0`; both become [`GithubError::RateLimited`].

use serde::de::DeserializeOwned;

use crate::error::GithubError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests**, or **403** with `X-RateLimit-Remaining: 0`
///   → [`GithubError::RateLimited`] (`Retry-After` in seconds, 60 s fallback).
/// - **Non-success status** → [`GithubError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    if resp.status() == 429 || (resp.status() == 403 && quota_exhausted(&resp)) {
        let retry_after = parse_retry_after(&resp);
        return Err(GithubError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(GithubError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read the body and decode it as JSON, reporting decode failures as
/// [`GithubError::Parse`] with the target type in the message.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GithubError> {
    let text = resp.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| GithubError::Parse(format!("{}: {e}", std::any::type_name::<T>())))
}

fn quota_exhausted(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
