//! legacy_redirects library: URL discovery and redirect auditing for site migrations
//!
//! Two pipelines, run one after the other and connected only by a flat file
//! of URLs:
//!
//! 1. **Discovery** ([`run_discovery`]) builds the normalized list of page URLs
//!    of a legacy origin from its sitemaps, falling back to a bounded
//!    same-origin crawl.
//! 2. **Audit** ([`run_audit`]) follows each URL's redirect chain hop by hop
//!    and checks it against a [`Policy`], writing a CSV report.
//!
//! # Example
//!
//! ```no_run
//! use legacy_redirects::{run_audit, AuditConfig, Policy};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuditConfig {
//!     input: PathBuf::from("legacy-urls.txt"),
//!     expected_host: "www.example.com".to_string(),
//!     policy: Policy::Migration,
//!     ..Default::default()
//! };
//!
//! let report = run_audit(&config).await?;
//! println!("{} of {} URLs pass", report.passed(), report.total());
//! # Ok(())
//! # }
//! ```
//!
//! Requests are issued strictly one at a time; the library needs a Tokio
//! runtime only for async I/O and the fixed delays between requests.

pub mod app;
pub mod audit;
pub mod config;
pub mod discovery;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod models;

pub use audit::{run_audit, AuditReport, Policy, Verdict};
pub use config::{AuditArgs, AuditConfig, DiscoverArgs, DiscoveryConfig, LogFormat, LogLevel};
pub use discovery::{normalize_url, run_discovery, DiscoveryReport};
pub use fetch::follow_redirect_chain;
pub use models::{ChainError, ChainResult, FinalStatus, RedirectHop};
