//! Error types for the outliner library.

use thiserror::Error;

/// Result type alias for outliner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a document outline.
#[derive(Error, Debug)]
pub enum Error {
    /// The external word-extraction engine could not produce tokens for a document.
    #[error("Word extraction failed: {0}")]
    Extraction(String),

    /// Prediction was requested but no trained model is available.
    #[error("No trained model available")]
    ModelUnavailable,

    /// The document produced no text lines at all.
    #[error("Document contains no extractable text lines")]
    EmptyDocument,

    /// Model training could not complete.
    #[error("Training error: {0}")]
    Training(String),

    /// Error serializing or deserializing outline structures.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
