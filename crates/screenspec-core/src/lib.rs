//! Core types and utilities for screenspec.
//!
//! This crate provides the document model shared by the editor, the
//! resolver, the validator, and every emission backend:
//! - Screen, node, and component definition types
//! - The typed style bag and responsive overrides
//! - The design token table
//! - Tree navigation helpers
//! - Error types

pub mod errors;
pub mod model;
pub mod style;
pub mod tokens;
pub mod tree;

pub use errors::*;
pub use model::*;
pub use style::*;
pub use tokens::*;
pub use tree::Walk;
