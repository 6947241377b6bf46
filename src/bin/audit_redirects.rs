//! `audit-redirects`: follows the redirect chain of every legacy URL and
//! writes a pass/fail CSV report.
//!
//! This is a thin wrapper around the `legacy_redirects` library that handles
//! argument parsing, logger initialization and the console summary. Exit code
//! is 0 whenever the report was written, however many URLs failed.

use std::process;

use legacy_redirects::app::{
    log_chain_error_statistics, parse_args, print_audit_summary, ParsedArgs,
};
use legacy_redirects::initialization::init_logger_with;
use legacy_redirects::{run_audit, AuditArgs, AuditConfig};

#[tokio::main]
async fn main() {
    let (args, ignored): (AuditArgs, Vec<String>) = match parse_args(std::env::args()) {
        ParsedArgs::Run { args, ignored } => (args, ignored),
        ParsedArgs::Exit(code) => process::exit(code),
    };

    if let Err(e) = init_logger_with(args.log_level.clone().into(), args.log_format.clone()) {
        eprintln!("audit-redirects error: {e}");
        process::exit(1);
    }
    if !ignored.is_empty() {
        log::debug!("Ignoring unrecognized options: {}", ignored.join(" "));
    }

    let config = match AuditConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("audit-redirects error: {e}");
            process::exit(1);
        }
    };

    match run_audit(&config).await {
        Ok(report) => {
            log_chain_error_statistics(&report.error_stats);
            print_audit_summary(&report);
        }
        Err(e) => {
            eprintln!("audit-redirects error: {e:#}");
            process::exit(1);
        }
    }
}
