//! Batch compiler for screenspec.
//!
//! Discovers screen specs on disk, validates each one, resolves component
//! references and tokens, emits through the configured backend, and writes
//! only the files whose content changed. A failing screen is reported and
//! the rest of the batch still compiles.
//!
//! [`compile_pure`] runs the same pipeline over in-memory documents.

pub mod config;
pub mod discovery;
mod error;
pub mod pipeline;
pub mod pure;

pub use config::CompilerConfig;
pub use discovery::{discover, pattern_regex};
pub use error::{CompileError, Result, ScreenError, ScreenErrorKind};
pub use pipeline::{CompileOptions, CompileReport, Compiler, ValidationSummary};
pub use pure::{compile_pure, PureOutput, ScreenInput};
