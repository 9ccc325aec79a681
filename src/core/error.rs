//! Error types for workspace model operations.

use thiserror::Error;

/// Errors that can occur while locating, loading, or packaging models.
///
/// Single-item operations surface the first error to the caller. Batch
/// operations (package import, workspace migration) fold per-item errors into
/// their report and keep going. `Configuration` indicates a wiring defect and
/// must stop startup rather than become a per-request report entry.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The URN resolves to no file in the workspace.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Malformed URN, unparseable content, or content missing its own
    /// declared subject.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Content loaded but does not define the requested subject.
    #[error("urn not found: {0}")]
    UrnNotFound(String),

    /// Upload is not a valid archive, or a file/entry is unreadable.
    #[error("file read error: {0}")]
    FileRead(String),

    /// Export dependency closure cannot be completed.
    #[error("generation error: {0}")]
    Generation(String),

    /// No strategy registered for a requested kind. Fatal, not retried.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ModelError {
    /// Create a file-not-found error.
    pub fn file_not_found(message: impl Into<String>) -> Self {
        Self::FileNotFound(message.into())
    }

    /// Create an invalid-model error.
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel(message.into())
    }

    /// Create a urn-not-found error.
    pub fn urn_not_found(message: impl Into<String>) -> Self {
        Self::UrnNotFound(message.into())
    }

    /// Create a file-read error.
    pub fn file_read(message: impl Into<String>) -> Self {
        Self::FileRead(message.into())
    }

    /// Create a generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
