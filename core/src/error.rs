//! Error types for the Calendly client.
//!
//! # Design
//! Only failures that prevent a typed response from existing are errors:
//! the exchange never completed (`Transport`), or the body did not decode
//! (`Decode`). A provider-reported failure (401, 403, 422, ...) decodes into
//! a normal response whose envelope carries the status; callers turn it into
//! a `StatusError` with `ApiResponse::err` when they want to propagate it.

use thiserror::Error;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `CalendlyClient` operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection failure, unreachable host, or the body could not be read.
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The response body is not JSON or does not match the expected shape.
    #[error("decoding response failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL and path did not form a valid URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required environment variable is missing or empty.
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider reported a failure inside the response envelope.
    #[error(transparent)]
    Status(#[from] StatusError),
}

/// A failure status reported inside a decoded response envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StatusError {
    pub status: u16,
    pub kind: String,
    pub message: String,
}
