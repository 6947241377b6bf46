//! Sitemap discovery.
//!
//! Sources are processed in priority order: local sitemap files, then sitemaps
//! announced in `robots.txt`, then the well-known sitemap paths of the origin,
//! and finally every nested sitemap referenced from one already processed. A
//! visited set guarantees each sitemap URL is fetched once, so cyclic
//! sitemap indexes still terminate.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::config::{ROBOTS_TXT_PATH, WELL_KNOWN_SITEMAP_PATHS};
use crate::discovery::normalize::normalize_url;
use crate::discovery::traversal::Traversal;
use crate::fetch::fetch_text;

static LOC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<loc(?:\s[^>]*)?>(.*?)</loc\s*>").expect("LOC_REGEX should compile")
});

static HTML_SNIFF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!doctype\s+html|<html[\s>]|<head[\s>]|<body[\s>]")
        .expect("HTML_SNIFF_REGEX should compile")
});

/// A sitemap source that could not be used, surfaced in the discovery summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// File path or URL of the source
    pub source: String,
    /// Human-readable reason
    pub reason: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

/// Why fetched sitemap text was not accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SitemapRejection {
    #[error("empty response")]
    Empty,
    #[error("received an HTML document instead of sitemap XML")]
    Html,
    #[error("no <loc> entries found")]
    NoLocations,
}

/// What the sitemap walk produced.
#[derive(Debug, Default)]
pub struct SitemapOutcome {
    /// Normalized page URLs, sorted
    pub found: BTreeSet<String>,
    /// Sources that were skipped, in processing order
    pub failures: Vec<SourceFailure>,
    /// Number of remote sitemap URLs fetched (successfully or not)
    pub sitemaps_fetched: usize,
}

/// Walks local and remote sitemaps for one origin.
pub struct SitemapWalker<'a> {
    client: &'a reqwest::Client,
    origin: &'a Url,
    queue: Traversal,
    found: BTreeSet<String>,
    failures: Vec<SourceFailure>,
}

impl<'a> SitemapWalker<'a> {
    pub fn new(client: &'a reqwest::Client, origin: &'a Url) -> Self {
        Self {
            client,
            origin,
            queue: Traversal::new(),
            found: BTreeSet::new(),
            failures: Vec::new(),
        }
    }

    /// Runs every source to exhaustion and returns what was found.
    pub async fn run(mut self, local_files: &[PathBuf]) -> SitemapOutcome {
        self.read_local_files(local_files).await;
        self.enqueue_robots_sitemaps().await;
        self.enqueue_well_known();
        self.drain().await;
        self.into_outcome()
    }

    /// Reads local sitemap files. Missing files are skipped quietly.
    pub async fn read_local_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            self.read_local_file(path).await;
        }
    }

    async fn read_local_file(&mut self, path: &Path) {
        let source = path.display().to_string();
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Local sitemap {} not present, skipping", source);
                return;
            }
            Err(e) => {
                self.record_failure(source, format!("cannot read file: {e}"));
                return;
            }
        };
        if let Err(rejection) = self.ingest(&source, &text) {
            self.record_failure(source, rejection.to_string());
        }
    }

    /// Enqueues every `Sitemap:` directive of the origin's `robots.txt`.
    ///
    /// A missing or unreadable robots file is not a sitemap failure.
    pub async fn enqueue_robots_sitemaps(&mut self) {
        let Ok(robots_url) = self.origin.join(ROBOTS_TXT_PATH) else {
            return;
        };
        match fetch_text(self.client, robots_url.as_str()).await {
            Ok(page) => {
                for sitemap in parse_robots_sitemaps(&page.body, self.origin) {
                    debug!("robots.txt announces sitemap {}", sitemap);
                    self.queue.enqueue(sitemap);
                }
            }
            Err(e) => debug!("No usable robots.txt at {}: {}", robots_url, e),
        }
    }

    /// Enqueues the well-known sitemap locations of the origin.
    pub fn enqueue_well_known(&mut self) {
        for path in WELL_KNOWN_SITEMAP_PATHS {
            if let Ok(url) = self.origin.join(path) {
                self.queue.enqueue(url.to_string());
            }
        }
    }

    /// Fetches queued sitemaps until none is left.
    pub async fn drain(&mut self) {
        while let Some(sitemap_url) = self.queue.pop_next() {
            let page = match fetch_text(self.client, &sitemap_url).await {
                Ok(page) => page,
                Err(e) => {
                    self.record_failure(sitemap_url, e.to_string());
                    continue;
                }
            };
            if let Err(rejection) = self.ingest(&sitemap_url, &page.body) {
                self.record_failure(sitemap_url, rejection.to_string());
            }
        }
    }

    /// Extracts the `<loc>` entries of one sitemap document.
    ///
    /// Every entry is offered to the normalizer; entries that look like nested
    /// sitemaps are also queued. Returns the number of entries read.
    pub fn ingest(&mut self, source: &str, text: &str) -> Result<usize, SitemapRejection> {
        let locations = parse_sitemap(text)?;
        let before = self.found.len();

        for raw in &locations {
            if let Some(url) = normalize_url(raw, self.origin) {
                self.found.insert(url);
            }
            if looks_like_sitemap_ref(raw) {
                if let Ok(nested) = self.origin.join(raw) {
                    if self.queue.enqueue(nested.to_string()) {
                        debug!("{} references nested sitemap {}", source, nested);
                    }
                }
            }
        }

        info!(
            "Sitemap {}: {} entries, {} new page URLs",
            source,
            locations.len(),
            self.found.len() - before
        );
        Ok(locations.len())
    }

    fn record_failure(&mut self, source: String, reason: String) {
        warn!("Skipping sitemap source {}: {}", source, reason);
        self.failures.push(SourceFailure { source, reason });
    }

    pub fn into_outcome(self) -> SitemapOutcome {
        SitemapOutcome {
            found: self.found,
            failures: self.failures,
            sitemaps_fetched: self.queue.visited_count(),
        }
    }
}

/// Validates sitemap text and returns its decoded `<loc>` values.
///
/// # Errors
///
/// Rejects empty text, text that sniffs as an HTML document, and documents
/// without any `<loc>` entry.
pub fn parse_sitemap(text: &str) -> Result<Vec<String>, SitemapRejection> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(SitemapRejection::Empty);
    }
    if HTML_SNIFF_REGEX.is_match(text) {
        return Err(SitemapRejection::Html);
    }
    let locations: Vec<String> = LOC_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_xml_entities(strip_cdata(m.as_str().trim())))
        .filter(|loc| !loc.is_empty())
        .collect();
    if locations.is_empty() {
        return Err(SitemapRejection::NoLocations);
    }
    Ok(locations)
}

/// Decodes the five predefined XML entities.
///
/// `&amp;` is decoded last so that `&amp;lt;` yields `&lt;`, not `<`.
pub fn decode_xml_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn strip_cdata(text: &str) -> &str {
    text.strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .map(str::trim)
        .unwrap_or(text)
}

/// Whether a `<loc>` value points at another sitemap.
pub fn looks_like_sitemap_ref(raw: &str) -> bool {
    raw.to_ascii_lowercase().contains("sitemap")
}

/// Returns the absolute URLs of every `Sitemap:` directive in a robots file.
pub fn parse_robots_sitemaps(text: &str, origin: &Url) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or("");
            let (key, value) = line.split_once(':')?;
            if !key.trim().eq_ignore_ascii_case("sitemap") {
                return None;
            }
            origin.join(value.trim()).ok().map(|url| url.to_string())
        })
        .collect()
}
