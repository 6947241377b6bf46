//! Error type definitions.
//!
//! This module defines the configuration and initialization errors that abort a
//! run, and the categories used to count per-URL chain failures.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Fatal configuration problems, reported before any per-URL work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The base origin is not an absolute http(s) URL.
    #[error("Invalid --base origin '{0}': expected an absolute http(s) URL such as https://www.example.com")]
    InvalidBase(String),

    /// The request timeout is zero or not a number.
    #[error("Invalid --timeout-ms '{0}': expected a positive number of milliseconds")]
    InvalidTimeout(String),

    /// The hop limit is zero.
    #[error("Invalid --max-hops: expected a positive number of hops")]
    InvalidMaxHops,

    /// The expected host is blank.
    #[error("Invalid --expected-host '{0}': expected a hostname")]
    InvalidExpectedHost(String),

    /// The input URL list does not exist.
    #[error("Input file not found: {}. Run discover-urls first or pass --in=<path>", .0.display())]
    InputNotFound(PathBuf),

    /// The input URL list exists but cannot be read.
    #[error("Cannot read input file {}: {source}. Check the path and its permissions", .path.display())]
    InputUnreadable {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The input URL list has no URL lines.
    #[error("Input file {} contains no URLs", .0.display())]
    EmptyInput(PathBuf),
}

/// Failure to fetch a sitemap or page body during discovery.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request did not produce a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// The response body could not be read as text.
    #[error("failed to read body: {0}")]
    Body(String),
}

/// Ways a redirect chain can end without a usable final response.
///
/// Every variant maps to a sentinel or error message on a `ChainResult`; the
/// counts are logged at the end of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ChainErrorKind {
    /// The request did not complete before the per-request timeout.
    Timeout,
    /// The connection could not be established.
    Connect,
    /// Any other transport failure.
    Request,
    /// The starting URL could not be parsed.
    InvalidUrl,
    /// A redirect carried a Location header that does not resolve to a URL.
    InvalidLocation,
    /// A redirect pointed back to a URL already visited in the chain.
    RedirectLoop,
    /// The chain was still redirecting when the hop limit was reached.
    TooManyHops,
}

impl std::fmt::Display for ChainErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ChainErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainErrorKind::Timeout => "Request timeout",
            ChainErrorKind::Connect => "Connection error",
            ChainErrorKind::Request => "Request error",
            ChainErrorKind::InvalidUrl => "Invalid URL",
            ChainErrorKind::InvalidLocation => "Invalid Location header",
            ChainErrorKind::RedirectLoop => "Redirect loop",
            ChainErrorKind::TooManyHops => "Too many hops",
        }
    }
}
