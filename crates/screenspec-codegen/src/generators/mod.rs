//! Emission backends for the supported frameworks.

mod common;
mod compose;
mod nextjs;
mod react;
mod react_native;
mod swiftui;
mod templates;
mod web;

pub use common::{DataBinding, ScreenFeatures};
pub use compose::ComposeBackend;
pub use nextjs::NextjsBackend;
pub use react::ReactBackend;
pub use react_native::ReactNativeBackend;
pub use swiftui::SwiftUiBackend;
pub use templates::TemplateEngine;

use screenspec_core::ScreenSpec;

use crate::config::{BackendConfig, Framework};
use crate::error::{CodegenError, Result};
use crate::format::format_output;

/// First line of every generated file, after the comment leader.
pub const GENERATED_MARKER: &str = "Generated by screenspec. Do not edit.";

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root, with `/` separators.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Files produced for one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOutput {
    /// Exported component name, listed in the barrel index.
    pub component_name: String,
    pub files: Vec<GeneratedFile>,
}

/// Common contract of every backend.
///
/// Backends receive a fully resolved screen: ComponentRef nodes that remain
/// are unresolved placeholders, and style values are literals.
pub trait ScreenBackend: Send + Sync {
    /// Framework name, as used in config files.
    fn name(&self) -> &'static str;

    /// Emit the files for one screen.
    fn emit_screen(&self, spec: &ScreenSpec, config: &BackendConfig) -> Result<EmitOutput>;

    /// Emit the index that re-exports every screen in `names`.
    fn emit_barrel_index(&self, names: &[String], config: &BackendConfig) -> Result<GeneratedFile>;
}

/// The backend for a framework.
pub fn backend_for(framework: Framework) -> Box<dyn ScreenBackend> {
    match framework {
        Framework::Nextjs => Box::new(NextjsBackend::new()),
        Framework::React => Box::new(ReactBackend::new()),
        Framework::ReactNative => Box::new(ReactNativeBackend::new()),
        Framework::Swiftui => Box::new(SwiftUiBackend::new()),
        Framework::Compose => Box::new(ComposeBackend::new()),
    }
}

/// Emit one screen with `backend` and format every file it produces.
pub fn emit_formatted(
    backend: &dyn ScreenBackend,
    spec: &ScreenSpec,
    config: &BackendConfig,
) -> Result<EmitOutput> {
    if !spec.route.starts_with('/') {
        return Err(CodegenError::InvalidDocument(format!(
            "route {:?} must start with '/'",
            spec.route
        )));
    }
    let mut output = backend.emit_screen(spec, config)?;
    for file in &mut output.files {
        file.content = format_output(&file.content);
    }
    tracing::debug!(
        backend = backend.name(),
        route = %spec.route,
        files = output.files.len(),
        "emitted screen"
    );
    Ok(output)
}

/// Join a directory and a file name with `/`.
pub(crate) fn join_path(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}
