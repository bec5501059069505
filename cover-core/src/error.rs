//! Error types for document operations.

use thiserror::Error;

/// Result type for document operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by document parsing and validation.
///
/// Editor operations themselves degrade to no-ops on constraint violations
/// and never return errors; these variants cover the external interchange
/// surfaces (persisted documents, clipboard payloads).
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record parsed but violates document constraints.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}
