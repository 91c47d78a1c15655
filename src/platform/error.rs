// ABOUTME: Platform client error types.
// ABOUTME: SNAFU transport errors with source context, plus the fault/transport split.

use super::fault::ApiFault;
use snafu::Snafu;
use std::time::Duration;

/// Transport-level failures talking to the platform.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    #[snafu(display("invalid platform endpoint {endpoint}: {reason}"))]
    InvalidEndpoint { endpoint: String, reason: String },

    #[snafu(display("failed to connect to {authority}: {source}"))]
    Connect {
        authority: String,
        source: std::io::Error,
    },

    #[snafu(display("HTTP handshake with {authority} failed: {source}"))]
    Handshake {
        authority: String,
        source: hyper::Error,
    },

    #[snafu(display("failed to encode request body: {source}"))]
    Encode { source: serde_json::Error },

    #[snafu(display("failed to build request for {path}: {source}"))]
    BuildRequest {
        path: String,
        source: hyper::http::Error,
    },

    #[snafu(display("request to {path} failed: {source}"))]
    Request { path: String, source: hyper::Error },

    #[snafu(display("failed to read response from {path}: {source}"))]
    ReadBody { path: String, source: hyper::Error },

    #[snafu(display("failed to decode response from {path}: {source}"))]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[snafu(display("unexpected response ({status}) from {path}: {body}"))]
    UnexpectedResponse {
        status: u16,
        path: String,
        body: String,
    },

    #[snafu(display("request to {path} timed out after {timeout:?}"))]
    Timeout { path: String, timeout: Duration },
}

/// Outcome of a failed platform call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The platform answered with a structured fault.
    #[error("platform fault: {0}")]
    Fault(ApiFault),

    /// The platform could not be reached or answered with something unreadable.
    #[error(transparent)]
    Transport(#[from] ClientError),
}

impl From<ApiFault> for ApiError {
    fn from(fault: ApiFault) -> Self {
        ApiError::Fault(fault)
    }
}
