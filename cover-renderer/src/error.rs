//! Error types for rendering and export.

use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or encoding a scene.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Export encoding failed.
    #[error("export failed: {0}")]
    Export(String),

    /// A referenced resource (image data) could not be loaded.
    #[error("failed to load resource: {0}")]
    Resource(String),
}
