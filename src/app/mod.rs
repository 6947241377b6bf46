//! Binary-facing helpers.
//!
//! This module provides argument pre-processing and the console summaries that
//! the two tools print when a run completes.

pub mod args;
pub mod statistics;

pub use args::{parse_args, split_recognized_args, ParsedArgs};
pub use statistics::{log_chain_error_statistics, print_audit_summary, print_discovery_summary};
