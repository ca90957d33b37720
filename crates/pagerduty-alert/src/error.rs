//! Error types for alert delivery.

use std::error::Error as _;

use thiserror::Error;

/// Ways a single delivery attempt can fail.
#[derive(Debug, Error)]
pub enum SendError {
    /// No integration key was supplied, nothing was sent
    #[error("Input required and not supplied: pagerduty-integration-key")]
    MissingRoutingKey,

    /// The request never produced a response
    #[error("Sending PagerDuty alert failed: {}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// The Events API answered with something other than 202
    #[error("PagerDuty API returned status code {status} - {body}")]
    Status { status: u16, body: String },
}

/// reqwest keeps the interesting part (e.g. "Connection refused") in the
/// source chain, so flatten it into one line.
fn error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
