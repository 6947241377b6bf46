//! HTTP redirect chain resolution.
//!
//! Chains are walked one request at a time with a client that never follows
//! redirects itself, so that the status and `Location` of every hop can be
//! recorded. Each step either continues to the next URL or ends the chain in
//! one of four terminal states: a final response, `loop`, `error` or
//! `too_many_hops`.

use std::collections::HashSet;
use std::time::Duration;

use log::debug;
use reqwest::header::LOCATION;
use url::Url;

use crate::error_handling::{categorize_reqwest_error, describe_reqwest_error, ChainErrorKind};
use crate::models::{ChainError, ChainResult, FinalStatus, RedirectHop};

/// Result of a single hop.
enum Step {
    /// Redirect to a resolved absolute URL.
    Continue(Url),
    /// The chain ends here.
    Terminal(FinalStatus, Option<ChainError>),
}

/// Follows the redirect chain of `start_url`, recording every hop.
///
/// # Arguments
///
/// * `client` - HTTP client with redirects disabled and a per-request timeout
/// * `start_url` - The legacy URL to start from
/// * `max_hops` - Maximum number of requests issued for this chain
/// * `hop_delay` - Pause inserted before following each redirect
///
/// Never fails: transport errors, unusable `Location` headers, loops and
/// overlong chains are captured on the returned `ChainResult`.
pub async fn follow_redirect_chain(
    client: &reqwest::Client,
    start_url: &str,
    max_hops: usize,
    hop_delay: Duration,
) -> ChainResult {
    let mut hops: Vec<RedirectHop> = Vec::new();

    let mut current = match Url::parse(start_url.trim()) {
        Ok(url) => url,
        Err(e) => {
            return ChainResult {
                start_url: start_url.to_string(),
                hops,
                final_url: start_url.to_string(),
                final_status: FinalStatus::Error,
                error: Some(ChainError::new(
                    ChainErrorKind::InvalidUrl,
                    format!("invalid URL: {e}"),
                )),
            };
        }
    };

    let mut visited: HashSet<String> = HashSet::new();

    for _ in 0..max_hops {
        if !visited.insert(current.to_string()) {
            let message = format!("redirect loop detected at {current}");
            return terminal(
                start_url,
                hops,
                &current,
                FinalStatus::Loop,
                Some(ChainError::new(ChainErrorKind::RedirectLoop, message)),
            );
        }

        match step(client, &current, &mut hops).await {
            Step::Continue(next) => {
                debug!("{} -> {}", current, next);
                current = next;
                tokio::time::sleep(hop_delay).await;
            }
            Step::Terminal(status, error) => {
                return terminal(start_url, hops, &current, status, error);
            }
        }
    }

    let message = format!("exceeded maximum of {max_hops} hops");
    terminal(
        start_url,
        hops,
        &current,
        FinalStatus::TooManyHops,
        Some(ChainError::new(ChainErrorKind::TooManyHops, message)),
    )
}

/// Issues one non-following request and decides where the chain goes next.
///
/// A hop is only appended when a response arrived.
async fn step(client: &reqwest::Client, current: &Url, hops: &mut Vec<RedirectHop>) -> Step {
    let response = match client.get(current.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let kind = categorize_reqwest_error(&e);
            debug!("Request to {} failed ({}): {}", current, kind, e);
            return Step::Terminal(
                FinalStatus::Error,
                Some(ChainError::new(kind, describe_reqwest_error(&e))),
            );
        }
    };

    let status = response.status().as_u16();
    let location = response
        .headers()
        .get(LOCATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
        .unwrap_or_default();

    hops.push(RedirectHop {
        url: current.to_string(),
        status,
        location: location.clone(),
    });

    if !(300..400).contains(&status) || location.is_empty() {
        return Step::Terminal(FinalStatus::Code(status), None);
    }

    match current.join(&location) {
        Ok(next) => Step::Continue(next),
        Err(e) => Step::Terminal(
            FinalStatus::Code(status),
            Some(ChainError::new(
                ChainErrorKind::InvalidLocation,
                format!("invalid location header '{location}': {e}"),
            )),
        ),
    }
}

fn terminal(
    start_url: &str,
    hops: Vec<RedirectHop>,
    current: &Url,
    final_status: FinalStatus,
    error: Option<ChainError>,
) -> ChainResult {
    ChainResult {
        start_url: start_url.to_string(),
        hops,
        final_url: current.to_string(),
        final_status,
        error,
    }
}
