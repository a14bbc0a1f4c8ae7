//! Code generation from resolved screen specs to framework source.
//!
//! A [`ScreenBackend`] turns one screen into files for its target framework
//! and renders the barrel index listing every screen. Five backends ship
//! with the crate:
//!
//! - `nextjs` - Next.js app router pages with Tailwind classes
//! - `react` - React components with inline style objects
//! - `react-native` - React Native screens with `StyleSheet.create`
//! - `swiftui` - SwiftUI views
//! - `compose` - Kotlin Compose composables
//!
//! # Example
//!
//! ```ignore
//! use screenspec_codegen::{backend_for, emit_formatted, BackendConfig, Framework};
//!
//! let config = BackendConfig::new(Framework::Swiftui);
//! let backend = backend_for(config.framework);
//! let output = emit_formatted(backend.as_ref(), &spec, &config)?;
//! ```

pub mod config;
mod error;
pub mod format;
pub mod generators;
pub mod naming;
pub mod scale;

pub use config::{BackendConfig, ComponentLibrary, Framework, LibraryComponent};
pub use error::{CodegenError, Result};
pub use format::format_output;
pub use generators::{
    backend_for, emit_formatted, EmitOutput, GeneratedFile, ScreenBackend, GENERATED_MARKER,
};
pub use naming::component_name;
