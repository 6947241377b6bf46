//! Error categorization.

use super::types::ChainErrorKind;

/// Categorizes a transport-level `reqwest::Error` into a `ChainErrorKind`.
///
/// Only failures that prevent a response are expected here; the redirect
/// client never follows redirects and never turns a status into an error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ChainErrorKind {
    if error.is_timeout() {
        ChainErrorKind::Timeout
    } else if error.is_connect() {
        ChainErrorKind::Connect
    } else if error.is_builder() {
        ChainErrorKind::InvalidUrl
    } else {
        ChainErrorKind::Request
    }
}

/// Describes a `reqwest::Error` including its source chain.
///
/// reqwest's own `Display` omits the underlying cause (e.g. "error sending
/// request"), which is not enough to tell a refused connection from a DNS
/// failure in the report.
pub fn describe_reqwest_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
