//! Integration tests for sitemap discovery and the fallback crawler.

use std::path::PathBuf;
use std::time::Duration;

use legacy_redirects::config::parse_origin;
use legacy_redirects::discovery::{crawl_same_origin, SitemapWalker};
use legacy_redirects::fetch::fetch_text;
use legacy_redirects::{run_discovery, DiscoveryConfig};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "helpers.rs"]
mod helpers;

use helpers::{
    discovery_client, mount_html, mount_redirect, mount_xml, sitemap_index, urlset, write_lines,
};

fn test_config(server: &MockServer, out_dir: &TempDir) -> DiscoveryConfig {
    DiscoveryConfig {
        origin: parse_origin(&server.uri()).expect("mock server uri is a valid origin"),
        out: out_dir.path().join("legacy-urls.txt"),
        local_files: Vec::new(),
        timeout: Duration::from_secs(5),
        crawl_delay: Duration::ZERO,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_nested_and_self_referencing_sitemaps_are_drained() {
    let server = MockServer::start().await;
    let base = server.uri();

    // The index lists itself next to its child; the walk must still end.
    mount_xml(
        &server,
        "/sitemap_index.xml",
        &sitemap_index(&[
            format!("{base}/sitemap_index.xml"),
            format!("{base}/post-sitemap.xml"),
        ]),
    )
    .await;
    mount_xml(
        &server,
        "/post-sitemap.xml",
        &urlset(&[
            format!("{base}/"),
            format!("{base}/services/water"),
            format!("{base}/blog/post-1/?utm_source=x#top"),
            format!("{base}/wp-content/uploads/photo.JPG"),
            "https://elsewhere.example.org/page/".to_string(),
            format!("{base}/sitemap_index.xml"),
        ]),
    )
    .await;

    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&server, &out_dir);
    let report = run_discovery(&config).await.expect("discovery should succeed");

    assert!(!report.crawled);
    assert_eq!(
        report.urls,
        vec![
            format!("{base}/"),
            format!("{base}/blog/post-1/"),
            format!("{base}/services/water/"),
        ]
    );

    let written = std::fs::read_to_string(&config.out).expect("URL list should be written");
    assert_eq!(written, format!("{}\n", report.urls.join("\n")));

    // The index and child are fetched once each; the other well-known probes 404.
    let index_fetches = server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter(|r| r.url.path() == "/sitemap_index.xml")
        .count();
    assert_eq!(index_fetches, 1);
    assert!(report
        .failures
        .iter()
        .any(|f| f.source.ends_with("/wp-sitemap.xml") && f.reason.contains("404")));
}

#[tokio::test]
async fn test_robots_txt_sitemap_directive_is_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nDisallow:\nSitemap: /maps/pages.xml\n"),
        )
        .mount(&server)
        .await;
    mount_xml(
        &server,
        "/maps/pages.xml",
        &urlset(&[format!("{base}/contact-us")]),
    )
    .await;

    let client = discovery_client();
    let origin = parse_origin(&base).expect("valid origin");
    let outcome = SitemapWalker::new(&client, &origin).run(&[]).await;

    assert_eq!(
        outcome.found.into_iter().collect::<Vec<_>>(),
        vec![format!("{base}/contact-us/")]
    );
    assert_eq!(outcome.sitemaps_fetched, 5);
}

#[tokio::test]
async fn test_local_sitemap_files_are_read_and_missing_ones_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();
    let local = write_lines(&[urlset(&[
        format!("{base}/about"),
        format!("{base}/team/"),
    ])]);

    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = test_config(&server, &out_dir);
    config.local_files = vec![
        out_dir.path().join("does-not-exist.xml"),
        local.path().to_path_buf(),
    ];

    let report = run_discovery(&config).await.expect("discovery should succeed");

    assert!(!report.crawled);
    assert_eq!(
        report.urls,
        vec![format!("{base}/about/"), format!("{base}/team/")]
    );
    // Only remote probes show up as failures; the absent local file does not.
    assert!(report
        .failures
        .iter()
        .all(|f| f.source.starts_with("http")));
}

#[tokio::test]
async fn test_html_served_as_sitemap_falls_back_to_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    // A soft-404 page answers 200 at the sitemap location.
    mount_html(
        &server,
        "/sitemap.xml",
        "<!DOCTYPE html><html><body>Not found</body></html>",
    )
    .await;
    mount_html(
        &server,
        "/",
        r#"<html><body><a href="/services">Services</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/services/", "<html><body>Services</body></html>").await;

    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&server, &out_dir);
    let report = run_discovery(&config).await.expect("discovery should succeed");

    assert!(report.crawled);
    assert_eq!(
        report.urls,
        vec![format!("{base}/"), format!("{base}/services/")]
    );
    assert!(report
        .failures
        .iter()
        .any(|f| f.source.ends_with("/sitemap.xml") && f.reason.contains("HTML")));
}

#[tokio::test]
async fn test_crawl_stays_on_origin_and_skips_assets() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/about">About</a>
            <a href="services/">Services</a>
            <a href="/brochure.pdf">Brochure</a>
            <a href="https://elsewhere.example.org/">Partner</a>
            <a href="mailto:office@example.com">Mail</a>
            <a href="/about?ref=nav#team">About again</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/about/",
        r#"<html><body><a href="/gone">Gone</a><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/services/", "<html><body>Services</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/gone/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = discovery_client();
    let origin = parse_origin(&base).expect("valid origin");
    let outcome = crawl_same_origin(&client, &origin, 400, Duration::ZERO).await;

    assert_eq!(
        outcome.found.into_iter().collect::<Vec<_>>(),
        vec![
            format!("{base}/"),
            format!("{base}/about/"),
            format!("{base}/services/"),
        ]
    );
    // "/", "/about/", "/services/" and the 404 page.
    assert_eq!(outcome.pages_fetched, 4);
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/page-{i}/">Page {i}</a>"#))
        .collect();
    mount_html(&server, "/", &format!("<html><body>{links}</body></html>")).await;
    for i in 0..10 {
        mount_html(&server, &format!("/page-{i}/"), "<html><body></body></html>").await;
    }

    let client = discovery_client();
    let origin = parse_origin(&base).expect("valid origin");
    let outcome = crawl_same_origin(&client, &origin, 3, Duration::ZERO).await;

    assert_eq!(outcome.pages_fetched, 3);
    assert_eq!(
        outcome.found.into_iter().collect::<Vec<_>>(),
        vec![
            format!("{base}/"),
            format!("{base}/page-0/"),
            format!("{base}/page-1/"),
        ]
    );
}

#[tokio::test]
async fn test_nothing_discovered_writes_empty_file() {
    let server = MockServer::start().await;
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&server, &out_dir);

    let report = run_discovery(&config).await.expect("discovery should succeed");

    assert!(report.crawled);
    assert!(report.urls.is_empty());
    assert_eq!(
        std::fs::read_to_string(&config.out).expect("URL list should be written"),
        ""
    );
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let server = MockServer::start().await;
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = test_config(&server, &out_dir);
    config.out = PathBuf::from(out_dir.path()).join("missing-dir").join("urls.txt");

    assert!(run_discovery(&config).await.is_err());
}

#[tokio::test]
async fn test_mounted_pages_keep_their_content_type() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_html(&server, "/", "<html><body>Home</body></html>").await;
    mount_xml(&server, "/sitemap.xml", &urlset(&[format!("{base}/")])).await;

    let client = discovery_client();
    let page = fetch_text(&client, &format!("{base}/"))
        .await
        .expect("page should fetch");
    assert_eq!(
        page.content_type.as_deref(),
        Some("text/html; charset=utf-8")
    );
    let map = fetch_text(&client, &format!("{base}/sitemap.xml"))
        .await
        .expect("sitemap should fetch");
    assert_eq!(map.content_type.as_deref(), Some("application/xml"));

    let origin = parse_origin(&base).expect("valid origin");
    let outcome = crawl_same_origin(&client, &origin, 10, Duration::ZERO).await;
    assert_eq!(
        outcome.found.into_iter().collect::<Vec<_>>(),
        vec![format!("{base}/")]
    );
}

#[tokio::test]
async fn test_crawl_resolves_links_against_redirected_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><body><a href="/old-section/">Section</a></body></html>"#,
    )
    .await;
    mount_redirect(&server, "/old-section/", 301, &format!("{base}/new/section/")).await;
    mount_html(
        &server,
        "/new/section/",
        r#"<html><body><a href="child/">Child</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/new/section/child/", "<html><body></body></html>").await;

    let client = discovery_client();
    let origin = parse_origin(&base).expect("valid origin");
    let outcome = crawl_same_origin(&client, &origin, 10, Duration::ZERO).await;

    // The requested URL is recorded; its links resolve against the redirect target.
    assert_eq!(
        outcome.found.into_iter().collect::<Vec<_>>(),
        vec![
            format!("{base}/"),
            format!("{base}/new/section/child/"),
            format!("{base}/old-section/"),
        ]
    );
}
