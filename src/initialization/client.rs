//! HTTP client initialization.
//!
//! This module provides functions to initialize HTTP clients with proper
//! configuration for page fetching and redirect inspection.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for fetching sitemaps and pages.
///
/// Creates a `reqwest::Client` configured with:
/// - the given User-Agent header
/// - a per-request timeout; an expired request is aborted and surfaces as an error
/// - reqwest's default redirect policy (up to 10 hops), since discovery only
///   cares about the content a URL ends up serving
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Initializes the HTTP client used for walking redirect chains.
///
/// Creates a `reqwest::Client` with redirects disabled so that every hop of a
/// chain is observed and recorded individually.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_redirect_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}
