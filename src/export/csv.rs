//! CSV export of audit results.
//!
//! Fields are quoted only when they contain a comma, a double quote or a line
//! break; embedded quotes are doubled. Every record, including the last, ends
//! with `\n`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::audit::{Policy, Verdict};
use crate::models::ChainResult;

/// Column names of the audit report, in order.
pub const REPORT_HEADER: [&str; 11] = [
    "mode",
    "old_url",
    "first_status",
    "first_location",
    "final_url",
    "final_status",
    "chain_hops",
    "final_host_ok",
    "pass",
    "pass_reason",
    "error",
];

/// One flattened audit result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub mode: String,
    pub old_url: String,
    /// Empty when no request got a response
    pub first_status: String,
    pub first_location: String,
    pub final_url: String,
    /// Numeric status or `loop`, `error`, `too_many_hops`
    pub final_status: String,
    pub chain_hops: usize,
    pub final_host_ok: bool,
    pub pass: bool,
    pub pass_reason: String,
    pub error: String,
}

impl ReportRow {
    pub fn new(
        policy: Policy,
        result: &ChainResult,
        verdict: &Verdict,
        expected_host: &str,
    ) -> Self {
        Self {
            mode: policy.to_string(),
            old_url: result.start_url.clone(),
            first_status: result
                .first_status()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            first_location: result.first_location().to_string(),
            final_url: result.final_url.clone(),
            final_status: result.final_status.to_string(),
            chain_hops: result.hop_count(),
            final_host_ok: result.final_host_matches(expected_host),
            pass: verdict.pass,
            pass_reason: verdict.reason.clone(),
            error: result.error_message().to_string(),
        }
    }
}

/// Writes the header and all rows to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_rows(file, rows)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

fn write_rows<W: Write>(out: W, rows: &[ReportRow]) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(::csv::QuoteStyle::Necessary)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
