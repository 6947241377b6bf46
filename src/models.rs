//! Data types shared by the redirect follower, the policy evaluator and the report.

use std::fmt;

use url::Url;

use crate::error_handling::ChainErrorKind;

/// One observed request/response pair of a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectHop {
    /// URL requested on this hop
    pub url: String,
    /// HTTP status returned
    pub status: u16,
    /// `Location` header value, empty if none was sent
    pub location: String,
}

/// How a redirect chain ended.
///
/// A numeric status means a response ended the chain; the other variants are
/// the sentinel outcomes that have no final response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalStatus {
    /// The last response's HTTP status
    Code(u16),
    /// A redirect pointed back to a URL already visited in the chain
    Loop,
    /// The last request failed before any response arrived
    Error,
    /// The chain was still redirecting when the hop limit was reached
    TooManyHops,
}

impl FinalStatus {
    /// Returns the HTTP status when the chain ended on a response.
    pub fn code(&self) -> Option<u16> {
        match self {
            FinalStatus::Code(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalStatus::Code(code) => write!(f, "{code}"),
            FinalStatus::Loop => f.write_str("loop"),
            FinalStatus::Error => f.write_str("error"),
            FinalStatus::TooManyHops => f.write_str("too_many_hops"),
        }
    }
}

/// Why a chain ended abnormally, with a human-readable message for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainError {
    /// Failure category
    pub kind: ChainErrorKind,
    /// Message written to the report's `error` column
    pub message: String,
}

impl ChainError {
    pub fn new(kind: ChainErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of following one starting URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainResult {
    /// URL the chain started from, as read from the input
    pub start_url: String,
    /// Every hop that produced a response, in request order
    pub hops: Vec<RedirectHop>,
    /// Last URL the follower was positioned on
    pub final_url: String,
    /// How the chain ended
    pub final_status: FinalStatus,
    /// Failure description; `None` when the chain ended on a response normally
    pub error: Option<ChainError>,
}

impl ChainResult {
    /// Status of the first hop, if any request produced a response.
    pub fn first_status(&self) -> Option<u16> {
        self.hops.first().map(|hop| hop.status)
    }

    /// `Location` header of the first hop, empty if none.
    pub fn first_location(&self) -> &str {
        self.hops.first().map(|hop| hop.location.as_str()).unwrap_or("")
    }

    /// Error message, empty when the chain ended normally.
    pub fn error_message(&self) -> &str {
        self.error.as_ref().map(|e| e.message.as_str()).unwrap_or("")
    }

    /// Number of hops recorded.
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Whether the final URL's host equals `expected_host` (ASCII case-insensitive).
    ///
    /// An unparsable final URL never matches.
    pub fn final_host_matches(&self, expected_host: &str) -> bool {
        Url::parse(&self.final_url)
            .ok()
            .and_then(|url| url.host_str().map(|h| h.eq_ignore_ascii_case(expected_host)))
            .unwrap_or(false)
    }
}
