//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of both
//! tools:
//! - Logger (plain or JSON)
//! - HTTP clients (page fetching and single-hop redirect inspection)
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

pub use client::{init_client, init_redirect_client};
pub use logger::init_logger_with;
