//! Plain body fetching for discovery.

use log::debug;
use reqwest::header::CONTENT_TYPE;

use crate::error_handling::{describe_reqwest_error, FetchError};

/// A successfully fetched text body.
#[derive(Debug, Clone)]
pub struct FetchedText {
    /// HTTP status of the final response
    pub status: u16,
    /// URL of the final response, after any redirects
    pub final_url: String,
    /// `Content-Type` header, if sent
    pub content_type: Option<String>,
    /// Response body decoded as text
    pub body: String,
}

/// Fetches `url` and returns its body as text.
///
/// Redirects are followed by the client. Any non-2xx final status is an error.
///
/// # Errors
///
/// Returns `FetchError` if the request fails, the status is not a success, or
/// the body cannot be decoded.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<FetchedText, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Request(describe_reqwest_error(&e)))?;

    let status = response.status();
    let final_url = response.url().to_string();
    if !status.is_success() {
        debug!("{} answered {}", url, status);
        return Err(FetchError::Status(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase());

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Body(describe_reqwest_error(&e)))?;

    Ok(FetchedText {
        status: status.as_u16(),
        final_url,
        content_type,
        body,
    })
}
