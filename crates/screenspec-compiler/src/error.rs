//! Error types for the compiler pipeline.
//!
//! Only batch-fatal conditions are errors here. A screen that fails to
//! validate or emit is recorded as a [`ScreenError`] and the batch goes on.

use std::fmt;
use std::path::PathBuf;

use screenspec_codegen::CodegenError;
use screenspec_core::ModelError;
use screenspec_validate::{ValidationError, ValidationReport};
use thiserror::Error;

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Conditions that abort a whole run.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A file could not be read or written.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A screen spec file is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config file is not a valid compiler config.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Token or registry file could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The configured schema could not be loaded.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Barrel emission failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("screens directory not found: {}", .0.display())]
    MissingSpecsDir(PathBuf),

    #[error("no screens matching {pattern:?} in {}", dir.display())]
    NoScreens { dir: PathBuf, pattern: String },

    #[error("invalid spec pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl CompileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why one screen dropped out of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenErrorKind {
    /// The raw document failed validation.
    Invalid(ValidationReport),
    /// The document validated but could not be deserialized.
    Decode(String),
    /// The backend rejected the resolved screen.
    Emit(String),
    /// An earlier screen in the batch already claimed the route.
    DuplicateRoute { first: String },
    /// A different route earlier in the batch maps to the same component.
    NameCollision {
        first: String,
        first_route: String,
        component: String,
    },
}

/// A per-screen failure recorded in a compile report.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenError {
    /// Where the screen came from: a file path, or `specs[i]` for pure input.
    pub source: String,
    pub route: Option<String>,
    pub kind: ScreenErrorKind,
}

impl ScreenError {
    pub fn new(source: impl Into<String>, route: Option<String>, kind: ScreenErrorKind) -> Self {
        Self {
            source: source.into(),
            route,
            kind,
        }
    }
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        if let Some(route) = &self.route {
            write!(f, " ({route})")?;
        }
        match &self.kind {
            ScreenErrorKind::Invalid(report) => {
                write!(f, ": {} validation issue(s)", report.len())?;
                for issue in report.issues() {
                    write!(f, "\n  {issue}")?;
                }
                Ok(())
            }
            ScreenErrorKind::Decode(message) => write!(f, ": cannot decode screen: {message}"),
            ScreenErrorKind::Emit(message) => write!(f, ": emission failed: {message}"),
            ScreenErrorKind::DuplicateRoute { first } => {
                write!(f, ": route already defined by {first}")
            }
            ScreenErrorKind::NameCollision {
                first,
                first_route,
                component,
            } => write!(
                f,
                ": component {component} already generated for {first_route} by {first}"
            ),
        }
    }
}

impl std::error::Error for ScreenError {}

#[cfg(test)]
mod tests {
    use super::*;
    use screenspec_validate::ValidationIssue;

    #[test]
    fn test_screen_error_lists_issues() {
        let mut report = ValidationReport::new();
        report.push(ValidationIssue::new("/tree/type", "is required"));
        let error = ScreenError::new(
            "specs/a.screen.json",
            Some("/a".to_string()),
            ScreenErrorKind::Invalid(report),
        );

        let text = error.to_string();
        assert!(text.starts_with("specs/a.screen.json (/a): 1 validation issue(s)"));
        assert!(text.contains("\n  /tree/type: is required"));
    }

    #[test]
    fn test_duplicate_route_names_first_source() {
        let error = ScreenError::new(
            "specs/b.screen.json",
            Some("/a".to_string()),
            ScreenErrorKind::DuplicateRoute {
                first: "specs/a.screen.json".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "specs/b.screen.json (/a): route already defined by specs/a.screen.json"
        );
    }

    #[test]
    fn test_name_collision_names_both_routes() {
        let error = ScreenError::new(
            "specs/a-slash.screen.json",
            Some("/a/".to_string()),
            ScreenErrorKind::NameCollision {
                first: "specs/a.screen.json".to_string(),
                first_route: "/a".to_string(),
                component: "AScreen".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "specs/a-slash.screen.json (/a/): component AScreen already generated for /a by specs/a.screen.json"
        );
    }
}
