//! URL discovery for a legacy site.
//!
//! Produces the deduplicated, normalized list of page URLs of one origin:
//! sitemaps first (local files, then remote sitemaps and their nested
//! indexes), and a bounded breadth-first crawl of same-origin links only when
//! no sitemap yields a single page.

mod crawl;
mod normalize;
mod sitemap;
mod traversal;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::DiscoveryConfig;
use crate::initialization::init_client;

pub use crawl::{crawl_same_origin, extract_links, is_html, CrawlOutcome};
pub use normalize::normalize_url;
pub use sitemap::{
    decode_xml_entities, looks_like_sitemap_ref, parse_robots_sitemaps, parse_sitemap,
    SitemapOutcome, SitemapRejection, SitemapWalker, SourceFailure,
};
pub use traversal::Traversal;

/// Results of a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// Normalized page URLs, lexicographically sorted
    pub urls: Vec<String>,
    /// Sitemap sources that were skipped, with reasons
    pub failures: Vec<SourceFailure>,
    /// Whether the fallback crawler ran
    pub crawled: bool,
    /// Pages requested by the crawler (0 when it did not run)
    pub pages_crawled: usize,
    /// File the URL list was written to
    pub out: PathBuf,
}

/// Runs discovery and writes the URL list.
///
/// Individual source failures never abort the run; they are collected in the
/// report.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the output file
/// cannot be written.
pub async fn run_discovery(config: &DiscoveryConfig) -> Result<DiscoveryReport> {
    let client = init_client(&config.user_agent, config.timeout)
        .context("Failed to initialize HTTP client")?;

    info!("Discovering URLs for {}", config.origin);

    let sitemaps = SitemapWalker::new(&client, &config.origin)
        .run(&config.local_files)
        .await;
    info!(
        "Sitemaps produced {} page URLs ({} remote sitemaps fetched, {} sources skipped)",
        sitemaps.found.len(),
        sitemaps.sitemaps_fetched,
        sitemaps.failures.len()
    );

    let mut found = sitemaps.found;
    let mut crawled = false;
    let mut pages_crawled = 0;

    if found.is_empty() {
        info!(
            "No sitemap URLs found, crawling {} (up to {} pages)",
            config.origin, config.max_pages
        );
        let crawl = crawl_same_origin(
            &client,
            &config.origin,
            config.max_pages,
            config.crawl_delay,
        )
        .await;
        crawled = true;
        pages_crawled = crawl.pages_fetched;
        found = crawl.found;
    }

    if found.is_empty() {
        warn!("No URLs discovered for {}", config.origin);
    }

    let urls: Vec<String> = found.into_iter().collect();
    write_url_list(&config.out, &urls)?;

    Ok(DiscoveryReport {
        urls,
        failures: sitemaps.failures,
        crawled,
        pages_crawled,
        out: config.out.clone(),
    })
}

/// Writes one URL per line, each line newline-terminated.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_url_list(path: &Path, urls: &[String]) -> Result<()> {
    let mut contents = String::with_capacity(urls.iter().map(|u| u.len() + 1).sum());
    for url in urls {
        contents.push_str(url);
        contents.push('\n');
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write URL list: {}", path.display()))
}
