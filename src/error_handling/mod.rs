//! Error handling and chain error statistics.
//!
//! This module provides:
//! - Fatal error types (configuration, initialization)
//! - Chain error categories and their per-run counters
//! - Categorization of transport errors returned by reqwest
//!
//! Fatal errors abort a run before any per-URL work. Everything that goes wrong
//! for a single sitemap source or a single URL is recorded as data instead.

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_reqwest_error, describe_reqwest_error};
pub use stats::ChainErrorStats;
pub use types::{ChainErrorKind, ConfigError, FetchError, InitializationError};
