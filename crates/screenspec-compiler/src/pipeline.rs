//! Batch compilation from disk to disk.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use screenspec_codegen::GeneratedFile;
use screenspec_core::DesignTokens;
use screenspec_resolver::ComponentRegistry;
use screenspec_validate::Validator;
use serde_json::Value;

use crate::config::CompilerConfig;
use crate::discovery::discover;
use crate::error::{CompileError, Result, ScreenError};
use crate::pure::{check_screen, compile_batch, CompileContext, ScreenInput};

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// Outcome of a compile run.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Screens that produced output.
    pub succeeded: usize,
    /// Screens recorded in `errors`.
    pub failed: usize,
    /// Files left alone because their content was already current.
    pub skipped: usize,
    /// Files written, or that would be written in a dry run.
    pub written: usize,
    /// Output paths that changed, in route order.
    pub changed: Vec<PathBuf>,
    pub errors: Vec<ScreenError>,
}

impl CompileReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Files produced, changed or not.
    pub fn files(&self) -> usize {
        self.skipped + self.written
    }
}

/// Outcome of a validate-only run.
#[derive(Debug, Default)]
pub struct ValidationSummary {
    pub checked: usize,
    pub errors: Vec<ScreenError>,
}

impl ValidationSummary {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compiles every screen under the configured specs directory.
pub struct Compiler {
    config: CompilerConfig,
    tokens: Option<DesignTokens>,
    registry: ComponentRegistry,
    validator: Validator,
}

impl Compiler {
    pub fn new(
        config: CompilerConfig,
        tokens: Option<DesignTokens>,
        registry: ComponentRegistry,
        validator: Validator,
    ) -> Self {
        Self {
            config,
            tokens,
            registry,
            validator,
        }
    }

    /// Load tokens, registry, and schema named by `config`.
    ///
    /// Without a `schemaPath` the bundled schema is used.
    pub fn from_config(config: CompilerConfig) -> Result<Self> {
        let tokens = config.tokens_path().map(DesignTokens::load).transpose()?;
        let registry = match &config.registry_path {
            Some(path) => ComponentRegistry::load(path)?,
            None => ComponentRegistry::new(),
        };
        let validator = match config.schema_path() {
            Some(path) => Validator::load(path)?,
            None => Validator::bundled()?,
        };
        tracing::debug!(
            tokens = tokens.is_some(),
            components = registry.len(),
            schema = validator.is_schema(),
            "compiler inputs loaded"
        );
        Ok(Self::new(config, tokens, registry, validator))
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile every screen and write what changed.
    pub fn compile(&self, options: CompileOptions) -> Result<CompileReport> {
        let inputs = self.read_inputs()?;
        let ctx = CompileContext {
            config: &self.config.backend,
            registry: &self.registry,
            tokens: self.tokens.as_ref(),
            validator: &self.validator,
        };
        let batch = compile_batch(inputs, ctx)?;

        let mut report = CompileReport {
            succeeded: batch.outputs.len(),
            failed: batch.errors.len(),
            ..CompileReport::default()
        };
        for file in batch.files() {
            let target = self.config.out_dir.join(&file.path);
            if is_current(&target, file) {
                tracing::debug!(path = %target.display(), "unchanged, skipping write");
                report.skipped += 1;
                continue;
            }
            if !options.dry_run {
                write_file(&target, file)?;
            }
            report.written += 1;
            report.changed.push(target);
        }
        report.errors = batch.errors;

        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed,
            written = report.written,
            skipped = report.skipped,
            dry_run = options.dry_run,
            "compile finished"
        );
        Ok(report)
    }

    /// Validate and decode every screen without emitting anything.
    pub fn validate_all(&self) -> Result<ValidationSummary> {
        let inputs = self.read_inputs()?;
        let errors: Vec<ScreenError> = inputs
            .par_iter()
            .filter_map(|input| check_screen(input, &self.validator).err())
            .collect();
        for error in &errors {
            tracing::warn!(source = %error.source, "{error}");
        }
        tracing::info!(checked = inputs.len(), failed = errors.len(), "validation finished");
        Ok(ValidationSummary {
            checked: inputs.len(),
            errors,
        })
    }

    fn read_inputs(&self) -> Result<Vec<ScreenInput>> {
        let paths = discover(&self.config.specs_dir, &self.config.spec_pattern)?;
        tracing::info!(count = paths.len(), dir = %self.config.specs_dir.display(), "found screens");
        paths.iter().map(|path| read_input(path)).collect()
    }
}

fn read_input(path: &Path) -> Result<ScreenInput> {
    let text = fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|source| CompileError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ScreenInput::new(path.display().to_string(), value))
}

fn is_current(target: &Path, file: &GeneratedFile) -> bool {
    fs::read(target).is_ok_and(|existing| existing == file.content.as_bytes())
}

fn write_file(target: &Path, file: &GeneratedFile) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| CompileError::io(parent, e))?;
    }
    fs::write(target, &file.content).map_err(|e| CompileError::io(target, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_files() {
        let report = CompileReport {
            skipped: 2,
            written: 1,
            ..CompileReport::default()
        };
        assert_eq!(report.files(), 3);
        assert!(report.is_success());
    }

    #[test]
    fn test_is_current_compares_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.tsx");
        let file = GeneratedFile::new("a.tsx", "export {};\n");

        assert!(!is_current(&target, &file));
        write_file(&target, &file).unwrap();
        assert!(is_current(&target, &file));
        assert!(!is_current(&target, &GeneratedFile::new("a.tsx", "export {};")));
    }
}
