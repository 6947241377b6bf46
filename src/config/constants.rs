//! Configuration constants.
//!
//! This module defines the defaults and operational parameters shared by the
//! discovery and audit pipelines: timeouts, delays, limits and well-known paths.

use std::time::Duration;

/// Default origin crawled by the discovery tool.
pub const DEFAULT_BASE_ORIGIN: &str = "https://www.example.com";

/// Default canonical host a migrated URL is expected to land on.
pub const DEFAULT_EXPECTED_HOST: &str = "www.example.com";

/// Default path of the flat URL list shared by both tools.
pub const DEFAULT_URL_LIST_PATH: &str = "legacy-urls.txt";

/// Default path of the audit CSV report.
pub const DEFAULT_REPORT_PATH: &str = "migration-redirect-report.csv";

/// Local sitemap filenames tried when `--from-files` is not given.
pub const DEFAULT_SITEMAP_FILES: &[&str] = &[
    "sitemap.xml",
    "sitemap_index.xml",
    "sitemap-index.xml",
    "page-sitemap.xml",
    "post-sitemap.xml",
];

/// Sitemap locations probed at the target origin, in priority order.
pub const WELL_KNOWN_SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/wp-sitemap.xml",
];

/// Path of the robots file scanned for `Sitemap:` directives.
pub const ROBOTS_TXT_PATH: &str = "/robots.txt";

/// Path extensions that mark a static asset rather than a page.
pub const STATIC_ASSET_EXTENSIONS: &[&str] = &[
    // images
    "jpg", "jpeg", "png", "gif", "svg", "webp", "avif", "ico", "bmp", "tif", "tiff",
    // styles and scripts
    "css", "js", "mjs", "map",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "csv", "zip",
    // fonts
    "woff", "woff2", "ttf", "otf", "eot",
    // media
    "mp3", "mp4", "webm", "mov",
    // data
    "xml", "json", "txt", "rss",
];

/// Maximum number of pages fetched by the fallback link crawler.
pub const DEFAULT_MAX_PAGES: usize = 400;

/// Per-request timeout used by the discovery tool, in milliseconds.
pub const DEFAULT_DISCOVERY_TIMEOUT_MS: u64 = 15_000;

/// Per-request timeout used by the auditor, in milliseconds.
pub const DEFAULT_AUDIT_TIMEOUT_MS: u64 = 12_000;

/// Maximum number of hops followed for a single starting URL.
pub const DEFAULT_MAX_REDIRECT_HOPS: usize = 8;

/// Pause between two hops of the same redirect chain.
pub const HOP_DELAY: Duration = Duration::from_millis(150);

/// Pause between two page fetches of the fallback crawler.
pub const CRAWL_DELAY: Duration = Duration::from_millis(100);

/// Number of discovered URLs echoed to stdout after discovery.
pub const DISCOVERY_PREVIEW_LIMIT: usize = 20;

/// Number of failing rows echoed to stdout after an audit.
pub const FAILURE_SAMPLE_LIMIT: usize = 10;

/// Audit progress is logged every this many URLs.
pub const LOGGING_INTERVAL: usize = 25;

/// Share of first-hop 200 responses above which a migration run with zero
/// passes suggests the site has not migrated yet.
pub const BASELINE_HINT_RATIO: f64 = 0.7;

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("legacy-redirects/", env!("CARGO_PKG_VERSION"));
