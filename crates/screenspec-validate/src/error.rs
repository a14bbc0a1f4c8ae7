//! Error types for loading validators.
//!
//! Validation failures themselves are data ([`crate::ValidationReport`]),
//! not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for validator construction.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while building a [`crate::Validator`].
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The schema file exists but could not be read.
    #[error("failed to read schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema is not valid JSON.
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema is JSON but not a usable schema.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

impl ValidationError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
