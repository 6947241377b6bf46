//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, delays, limits, well-known paths)
//! - CLI option types for both tools and the library configs they convert into

mod constants;
mod types;

pub use constants::*;
pub use types::{
    parse_origin, AuditArgs, AuditConfig, DiscoverArgs, DiscoveryConfig, LogFormat, LogLevel,
};
