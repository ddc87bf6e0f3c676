//! Error types for the live client gateway

use thiserror::Error;

/// Failures talking to the local game client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Connection refused, timed out or dropped; usually no match in progress
    #[error("unable to reach live client at {url}: {reason}")]
    Network { url: String, reason: String },

    /// The client answered but not with a success status (e.g. still loading)
    #[error("live client returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The body was not valid JSON
    #[error("live client response from {url} is not valid JSON: {reason}")]
    Parse { url: String, reason: String },
}
