//! Run summaries.
//!
//! The summaries are the tools' user-facing output and go to stdout; the chain
//! error breakdown goes to the log.

use log::info;
use strum::IntoEnumIterator;

use crate::audit::AuditReport;
use crate::config::{DISCOVERY_PREVIEW_LIMIT, FAILURE_SAMPLE_LIMIT};
use crate::discovery::DiscoveryReport;
use crate::error_handling::{ChainErrorKind, ChainErrorStats};

/// Prints the discovery summary: count, output path, skipped sources and the
/// first discovered URLs.
pub fn print_discovery_summary(report: &DiscoveryReport) {
    println!("DISCOVERED_COUNT={}", report.urls.len());
    println!("OUTPUT={}", report.out.display());
    if report.crawled {
        println!("SOURCE=crawl ({} pages fetched)", report.pages_crawled);
    } else {
        println!("SOURCE=sitemap");
    }

    if !report.failures.is_empty() {
        println!("Source notes:");
        for failure in &report.failures {
            println!("  - {failure}");
        }
    }

    if !report.urls.is_empty() {
        println!("First {} URLs:", report.urls.len().min(DISCOVERY_PREVIEW_LIMIT));
        for url in report.urls.iter().take(DISCOVERY_PREVIEW_LIMIT) {
            println!("  {url}");
        }
    }
}

/// Prints the audit summary: counts, output path, the baseline hint when it
/// applies, and a sample of failing rows.
pub fn print_audit_summary(report: &AuditReport) {
    println!("MODE={}", report.policy);
    println!("INPUT_COUNT={}", report.total());
    println!("FIRST_HOP_200={}", report.first_status_count(200));
    println!("FIRST_HOP_301={}", report.first_status_count(301));
    println!("PASS_COUNT={}", report.passed());
    println!("FAIL_COUNT={}", report.failed());
    println!("OUTPUT={}", report.out.display());

    if report.suggests_baseline() {
        println!(
            "NOTE: most URLs answered 200 without redirecting and none passed. \
             If the site has not migrated yet, re-run with --mode=baseline."
        );
    }

    let failures: Vec<_> = report.failures().take(FAILURE_SAMPLE_LIMIT).collect();
    if !failures.is_empty() {
        println!("Sample failures:");
        for row in failures {
            let first = if row.first_status.is_empty() {
                "-"
            } else {
                row.first_status.as_str()
            };
            print!(
                "  {} | first={} | final={} | hops={}",
                row.old_url, first, row.final_status, row.chain_hops
            );
            if row.error.is_empty() {
                println!();
            } else {
                println!(" | error={}", row.error);
            }
        }
    }
}

/// Logs the count of every chain error category that occurred.
pub fn log_chain_error_statistics(stats: &ChainErrorStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }
    info!("Chain error counts ({} total):", total);
    for kind in ChainErrorKind::iter() {
        let count = stats.get(kind);
        if count > 0 {
            info!("   {}: {}", kind, count);
        }
    }
}
