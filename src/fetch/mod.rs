//! Outbound HTTP: single-hop redirect walking for the audit and plain text
//! fetching for discovery.
//!
//! Requests are always awaited one at a time by the caller.

mod redirects;
mod text;

pub use redirects::follow_redirect_chain;
pub use text::{fetch_text, FetchedText};
