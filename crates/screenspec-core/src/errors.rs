//! Error types for the document model.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while loading or decoding documents.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The JSON text could not be parsed or did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The design token file has an unexpected top-level shape.
    #[error("invalid token table: {0}")]
    InvalidTokens(String),

    /// A component registry file has an unexpected shape.
    #[error("invalid component registry: {0}")]
    InvalidRegistry(String),
}

impl ModelError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
