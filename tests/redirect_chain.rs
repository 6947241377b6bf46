//! Integration tests for the redirect chain follower against a mock server.

use std::time::Duration;

use legacy_redirects::error_handling::ChainErrorKind;
use legacy_redirects::{follow_redirect_chain, FinalStatus};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "helpers.rs"]
mod helpers;

use helpers::{mount_html, mount_redirect, redirect_client};

const NO_DELAY: Duration = Duration::ZERO;

#[tokio::test]
async fn test_single_redirect_to_200() {
    let server = MockServer::start().await;
    let target = format!("{}/new/", server.uri());
    mount_redirect(&server, "/old", 301, &target).await;
    mount_html(&server, "/new/", "<html></html>").await;

    let client = redirect_client(Duration::from_secs(5));
    let result =
        follow_redirect_chain(&client, &format!("{}/old", server.uri()), 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Code(200));
    assert_eq!(result.final_url, target);
    assert_eq!(result.hop_count(), 2);
    assert_eq!(result.first_status(), Some(301));
    assert_eq!(result.first_location(), target);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_relative_location_is_resolved_against_current_url() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/dir/page", 302, "../landing/").await;
    mount_html(&server, "/landing/", "<html></html>").await;

    let client = redirect_client(Duration::from_secs(5));
    let result =
        follow_redirect_chain(&client, &format!("{}/dir/page", server.uri()), 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Code(200));
    assert_eq!(result.final_url, format!("{}/landing/", server.uri()));
    // The raw header is recorded, not the resolved URL.
    assert_eq!(result.hops[0].location, "../landing/");
}

#[tokio::test]
async fn test_redirect_loop_is_detected() {
    let server = MockServer::start().await;
    let a = format!("{}/a", server.uri());
    let b = format!("{}/b", server.uri());
    mount_redirect(&server, "/a", 301, &b).await;
    mount_redirect(&server, "/b", 301, &a).await;

    let client = redirect_client(Duration::from_secs(5));
    let result = follow_redirect_chain(&client, &a, 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Loop);
    assert_eq!(result.final_status.to_string(), "loop");
    assert_eq!(result.hop_count(), 2);
    assert_eq!(result.final_url, a);
    let error = result.error.expect("loop should carry an error");
    assert_eq!(error.kind, ChainErrorKind::RedirectLoop);
}

#[tokio::test]
async fn test_self_redirect_is_a_loop() {
    let server = MockServer::start().await;
    let a = format!("{}/self", server.uri());
    mount_redirect(&server, "/self", 302, &a).await;

    let client = redirect_client(Duration::from_secs(5));
    let result = follow_redirect_chain(&client, &a, 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Loop);
    assert_eq!(result.hop_count(), 1);
}

#[tokio::test]
async fn test_chain_longer_than_limit_is_too_many_hops() {
    let server = MockServer::start().await;
    // r0 -> r1 -> ... -> r9 -> 200
    for i in 0..10 {
        let next = format!("{}/r{}", server.uri(), i + 1);
        mount_redirect(&server, &format!("/r{i}"), 301, &next).await;
    }
    mount_html(&server, "/r10", "<html></html>").await;

    let client = redirect_client(Duration::from_secs(5));
    let result =
        follow_redirect_chain(&client, &format!("{}/r0", server.uri()), 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::TooManyHops);
    assert_eq!(result.final_status.to_string(), "too_many_hops");
    assert_eq!(result.hop_count(), 8);
    assert_eq!(result.final_url, format!("{}/r8", server.uri()));
    let error = result.error.expect("too_many_hops should carry an error");
    assert_eq!(error.kind, ChainErrorKind::TooManyHops);
    assert!(error.message.contains("8"));
}

#[tokio::test]
async fn test_redirect_without_location_ends_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301))
        .mount(&server)
        .await;

    let client = redirect_client(Duration::from_secs(5));
    let start = format!("{}/moved", server.uri());
    let result = follow_redirect_chain(&client, &start, 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Code(301));
    assert_eq!(result.final_url, start);
    assert_eq!(result.hop_count(), 1);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_unresolvable_location_ends_chain_with_error() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/broken", 302, "http://[::1").await;

    let client = redirect_client(Duration::from_secs(5));
    let result =
        follow_redirect_chain(&client, &format!("{}/broken", server.uri()), 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Code(302));
    assert_eq!(result.hop_count(), 1);
    let error = result.error.expect("bad location should carry an error");
    assert_eq!(error.kind, ChainErrorKind::InvalidLocation);
}

#[tokio::test]
async fn test_timeout_becomes_error_without_hops() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = redirect_client(Duration::from_millis(200));
    let start = format!("{}/slow", server.uri());
    let result = follow_redirect_chain(&client, &start, 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Error);
    assert_eq!(result.final_url, start);
    assert_eq!(result.hop_count(), 0);
    assert_eq!(result.first_status(), None);
    let error = result.error.expect("timeout should carry an error");
    assert_eq!(error.kind, ChainErrorKind::Timeout);
}

#[tokio::test]
async fn test_error_after_redirect_keeps_earlier_hops() {
    let server = MockServer::start().await;
    let slow = format!("{}/slow", server.uri());
    mount_redirect(&server, "/start", 301, &slow).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = redirect_client(Duration::from_millis(200));
    let result =
        follow_redirect_chain(&client, &format!("{}/start", server.uri()), 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Error);
    assert_eq!(result.final_url, slow);
    assert_eq!(result.hop_count(), 1);
    assert_eq!(result.first_status(), Some(301));
}

#[tokio::test]
async fn test_unparsable_start_url() {
    let client = redirect_client(Duration::from_secs(1));
    let result = follow_redirect_chain(&client, "not a url", 8, NO_DELAY).await;

    assert_eq!(result.final_status, FinalStatus::Error);
    assert_eq!(result.final_url, "not a url");
    assert_eq!(result.hop_count(), 0);
    let error = result.error.expect("invalid url should carry an error");
    assert_eq!(error.kind, ChainErrorKind::InvalidUrl);
}
