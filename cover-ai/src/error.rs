//! Error types for layout generation.

use thiserror::Error;

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur when requesting a generated layout.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A generation request is already in flight.
    ///
    /// There is no queue and no cancellation primitive; callers disable
    /// the triggering action while a request is outstanding.
    #[error("a generation request is already in flight")]
    Busy,

    /// The configured API endpoint is not a valid URL.
    #[error("invalid generation API URL: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, timeout, non-success status).
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote reply did not contain a parseable design document.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}
