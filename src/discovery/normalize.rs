//! URL normalization for discovered pages.

use url::Url;

use crate::config::STATIC_ASSET_EXTENSIONS;

/// Normalizes a candidate URL found in a sitemap or page into a canonical page URL.
///
/// The candidate is rejected (`None`) when it does not parse as an absolute URL,
/// when its origin (scheme, host and port) differs from `origin`, or when its
/// path ends in a static-asset extension. Accepted URLs lose their query and
/// fragment and always end their path with `/`.
///
/// Normalizing an already-normalized URL returns it unchanged.
///
/// # Arguments
///
/// * `raw` - Candidate URL, e.g. the text of a sitemap `<loc>` or a resolved anchor
/// * `origin` - The target origin
pub fn normalize_url(raw: &str, origin: &Url) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;

    if url.origin() != origin.origin() {
        return None;
    }

    if is_static_asset(url.path()) {
        return None;
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Some(url.to_string())
}

/// Whether the last path segment carries a static-asset extension.
fn is_static_asset(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            STATIC_ASSET_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}
