//! Redirect chain audit.
//!
//! Reads the legacy URL list, follows every URL's redirect chain one request at
//! a time, classifies it under the selected policy and writes the CSV report.
//! Per-URL failures become report rows; only configuration problems abort.

mod policy;

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::{AuditConfig, BASELINE_HINT_RATIO, LOGGING_INTERVAL};
use crate::error_handling::{ChainErrorStats, ConfigError};
use crate::export::{write_report, ReportRow};
use crate::fetch::follow_redirect_chain;
use crate::initialization::init_redirect_client;

pub use policy::{ChainFacts, Policy, Verdict};

/// Results of an audit run.
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// Policy the rows were evaluated under
    pub policy: Policy,
    /// One row per input URL, in input order
    pub rows: Vec<ReportRow>,
    /// Chain failures by category
    pub error_stats: ChainErrorStats,
    /// Path of the written CSV report
    pub out: std::path::PathBuf,
}

impl AuditReport {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn passed(&self) -> usize {
        self.rows.iter().filter(|row| row.pass).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Rows whose first hop answered `status`.
    pub fn first_status_count(&self, status: u16) -> usize {
        let status = status.to_string();
        self.rows
            .iter()
            .filter(|row| row.first_status == status)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| !row.pass)
    }

    /// Whether a migration run looks like it was pointed at a site that has
    /// not migrated yet: nothing passed and most URLs answered 200 directly.
    pub fn suggests_baseline(&self) -> bool {
        if self.policy != Policy::Migration || self.total() == 0 || self.passed() > 0 {
            return false;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.first_status_count(200) as f64 / self.total() as f64;
        ratio > BASELINE_HINT_RATIO
    }
}

/// Reads the URL list: one URL per line, blank lines and `#` comments skipped.
///
/// # Errors
///
/// Returns `ConfigError::InputNotFound`, `ConfigError::InputUnreadable` or
/// `ConfigError::EmptyInput`.
pub fn read_input_urls(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::InputNotFound(path.to_path_buf())
        } else {
            ConfigError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(ConfigError::EmptyInput(path.to_path_buf()));
    }
    Ok(urls)
}

/// Runs the audit and writes the CSV report.
///
/// # Errors
///
/// Returns an error if the input list is missing, unreadable or empty, if the
/// HTTP client cannot be built, or if the report cannot be written. No report
/// file is created in the first three cases.
pub async fn run_audit(config: &AuditConfig) -> Result<AuditReport> {
    let urls = read_input_urls(&config.input)?;
    let client = init_redirect_client(&config.user_agent, config.timeout)
        .context("Failed to initialize redirect client")?;

    info!(
        "Auditing {} URLs in {} mode (expected host: {}, max hops: {}, timeout: {}ms)",
        urls.len(),
        config.policy,
        config.expected_host,
        config.max_hops,
        config.timeout.as_millis()
    );

    let mut rows = Vec::with_capacity(urls.len());
    let mut error_stats = ChainErrorStats::new();

    for (index, url) in urls.iter().enumerate() {
        let result = follow_redirect_chain(&client, url, config.max_hops, config.hop_delay).await;
        if let Some(error) = &result.error {
            warn!("{}: {} ({})", url, result.final_status, error);
            error_stats.increment(error.kind);
        }

        let verdict = config.policy.evaluate(&result, &config.expected_host);
        rows.push(ReportRow::new(
            config.policy,
            &result,
            &verdict,
            &config.expected_host,
        ));

        let done = index + 1;
        if done % LOGGING_INTERVAL == 0 && done < urls.len() {
            let passed = rows.iter().filter(|row| row.pass).count();
            info!(
                "Progress: {}/{} URLs audited ({} passing)",
                done,
                urls.len(),
                passed
            );
        }
    }

    write_report(&config.out, &rows)?;

    Ok(AuditReport {
        policy: config.policy,
        rows,
        error_stats,
        out: config.out.clone(),
    })
}
