// Shared test helpers for mock servers and temporary input files.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a `GET` route answering with a redirect to `location`.
#[allow(dead_code)] // Used by other test files
pub async fn mount_redirect(server: &MockServer, route: &str, status: u16, location: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).insert_header("Location", location))
        .mount(server)
        .await;
}

/// Mounts a `GET` route answering 200 with an HTML body.
///
/// `set_body_raw` is used because `set_body_string` forces `text/plain`.
#[allow(dead_code)]
pub async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts a `GET` route answering 200 with an XML body.
#[allow(dead_code)]
pub async fn mount_xml(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/xml"),
        )
        .mount(server)
        .await;
}

/// Builds a `<urlset>` document from page URLs.
#[allow(dead_code)]
pub fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{loc}</loc></url>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</urlset>"#
    )
}

/// Builds a `<sitemapindex>` document from sitemap URLs.
#[allow(dead_code)]
pub fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{loc}</loc></sitemap>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</sitemapindex>"#
    )
}

/// Writes lines to a temporary file.
#[allow(dead_code)]
pub fn write_lines(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write line");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// Client used for redirect tests: no automatic redirects, short timeout.
#[allow(dead_code)]
pub fn redirect_client(timeout: Duration) -> reqwest::Client {
    legacy_redirects::initialization::init_redirect_client("legacy-redirects-test/1.0", timeout)
        .expect("Failed to build redirect client")
}

/// Client used for discovery tests: follows redirects.
#[allow(dead_code)]
pub fn discovery_client() -> reqwest::Client {
    legacy_redirects::initialization::init_client(
        "legacy-redirects-test/1.0",
        Duration::from_secs(5),
    )
    .expect("Failed to build client")
}
