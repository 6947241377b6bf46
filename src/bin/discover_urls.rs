//! `discover-urls`: writes the sorted list of page URLs of a legacy site.
//!
//! Thin wrapper around the `legacy_redirects` library: argument parsing,
//! logger initialization and the console summary.

use std::process;

use legacy_redirects::app::{parse_args, print_discovery_summary, ParsedArgs};
use legacy_redirects::initialization::init_logger_with;
use legacy_redirects::{run_discovery, DiscoverArgs, DiscoveryConfig};

#[tokio::main]
async fn main() {
    let (args, ignored): (DiscoverArgs, Vec<String>) = match parse_args(std::env::args()) {
        ParsedArgs::Run { args, ignored } => (args, ignored),
        ParsedArgs::Exit(code) => process::exit(code),
    };

    if let Err(e) = init_logger_with(args.log_level.clone().into(), args.log_format.clone()) {
        eprintln!("discover-urls error: {e}");
        process::exit(1);
    }
    if !ignored.is_empty() {
        log::debug!("Ignoring unrecognized options: {}", ignored.join(" "));
    }

    let config = match DiscoveryConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("discover-urls error: {e}");
            process::exit(1);
        }
    };

    match run_discovery(&config).await {
        Ok(report) => print_discovery_summary(&report),
        Err(e) => {
            eprintln!("discover-urls error: {e:#}");
            process::exit(1);
        }
    }
}
