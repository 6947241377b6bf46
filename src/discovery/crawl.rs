//! Fallback same-origin link crawler.

use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, info};
use scraper::{Html, Selector};
use url::Url;

use crate::discovery::normalize::normalize_url;
use crate::discovery::traversal::Traversal;
use crate::fetch::fetch_text;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("ANCHOR_SELECTOR should parse"));

/// What the crawl produced.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Normalized page URLs that were fetched as HTML
    pub found: BTreeSet<String>,
    /// Pages requested, including failed and non-HTML ones
    pub pages_fetched: usize,
}

/// Crawls same-origin HTML pages breadth-first from the origin root.
///
/// Stops when the frontier is empty or `max_pages` pages have been requested.
/// Failed fetches and non-HTML responses are skipped. `delay` is awaited
/// between consecutive fetches.
pub async fn crawl_same_origin(
    client: &reqwest::Client,
    origin: &Url,
    max_pages: usize,
    delay: Duration,
) -> CrawlOutcome {
    let mut outcome = CrawlOutcome::default();
    let mut frontier = Traversal::new();

    if let Some(root) = normalize_url(origin.as_str(), origin) {
        frontier.enqueue(root);
    }

    while frontier.visited_count() < max_pages {
        let Some(page_url) = frontier.pop_next() else {
            break;
        };
        if frontier.visited_count() > 1 {
            tokio::time::sleep(delay).await;
        }

        let page = match fetch_text(client, &page_url).await {
            Ok(page) => page,
            Err(e) => {
                debug!("Crawl skipped {}: {}", page_url, e);
                continue;
            }
        };
        if !is_html(page.content_type.as_deref(), &page.body) {
            debug!("Crawl skipped {}: not HTML", page_url);
            continue;
        }

        outcome.found.insert(page_url.clone());

        // Relative links resolve against where the page was actually served.
        let Ok(base) = Url::parse(&page.final_url) else {
            continue;
        };
        let mut queued = 0usize;
        for link in extract_links(&page.body, &base) {
            if let Some(normalized) = normalize_url(link.as_str(), origin) {
                if frontier.enqueue(normalized) {
                    queued += 1;
                }
            }
        }
        debug!(
            "Crawled {} ({} new links, {} pending)",
            page_url,
            queued,
            frontier.pending_count()
        );
    }

    outcome.pages_fetched = frontier.visited_count();
    info!(
        "Crawl finished: {} pages fetched, {} page URLs found{}",
        outcome.pages_fetched,
        outcome.found.len(),
        if frontier.is_exhausted() {
            ""
        } else {
            " (page budget reached)"
        }
    );
    outcome
}

/// Resolves every anchor `href` of an HTML page against the page's own URL.
///
/// Fragment-only, `mailto:` and `tel:` links are skipped, as are hrefs that do
/// not resolve.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !is_skipped_href(href))
        .filter_map(|href| page_url.join(href).ok())
        .collect()
}

fn is_skipped_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    href.starts_with('#') || lower.starts_with("mailto:") || lower.starts_with("tel:")
}

/// Whether a response should be parsed as HTML.
///
/// The content type decides when present; otherwise the body is sniffed.
pub fn is_html(content_type: Option<&str>, body: &str) -> bool {
    match content_type {
        Some(ct) => ct.contains("html"),
        None => {
            let head: String = body.chars().take(1024).collect::<String>().to_ascii_lowercase();
            head.contains("<!doctype html") || head.contains("<html")
        }
    }
}
