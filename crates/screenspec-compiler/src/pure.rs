//! The I/O-free core of the pipeline.
//!
//! Everything between "parsed JSON" and "formatted file bodies" lives here:
//! validation, decoding, duplicate-route detection, resolution, emission,
//! and the barrel index. [`crate::Compiler`] wraps it with discovery and
//! writes; [`compile_pure`] exposes it directly.

use std::collections::HashMap;

use rayon::prelude::*;
use screenspec_codegen::{
    backend_for, component_name, emit_formatted, format_output, BackendConfig, EmitOutput,
    GeneratedFile,
};
use screenspec_core::{DesignTokens, ScreenSpec};
use screenspec_resolver::{resolve, ComponentRegistry};
use screenspec_validate::Validator;
use serde_json::Value;

use crate::error::{Result, ScreenError, ScreenErrorKind};

/// One parsed screen document and where it came from.
#[derive(Debug, Clone)]
pub struct ScreenInput {
    pub source: String,
    pub value: Value,
}

impl ScreenInput {
    pub fn new(source: impl Into<String>, value: Value) -> Self {
        Self {
            source: source.into(),
            value,
        }
    }

    /// The declared route, if the document has one.
    pub fn route(&self) -> Option<&str> {
        self.value.get("route").and_then(Value::as_str)
    }
}

/// Shared read-only inputs for a batch.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    pub config: &'a BackendConfig,
    pub registry: &'a ComponentRegistry,
    pub tokens: Option<&'a DesignTokens>,
    pub validator: &'a Validator,
}

/// Result of compiling a batch in memory.
#[derive(Debug, Default)]
pub struct Batch {
    /// Successful screens in route order.
    pub outputs: Vec<EmitOutput>,
    pub barrel: Option<GeneratedFile>,
    /// Failed screens in route order.
    pub errors: Vec<ScreenError>,
}

impl Batch {
    /// Every generated file, screens first and the barrel last.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.outputs
            .iter()
            .flat_map(|output| output.files.iter())
            .chain(self.barrel.iter())
    }
}

/// File bodies and per-screen errors from [`compile_pure`].
#[derive(Debug, Default)]
pub struct PureOutput {
    pub files: Vec<GeneratedFile>,
    pub errors: Vec<ScreenError>,
}

/// Compile in-memory documents without touching the filesystem.
///
/// Documents are labelled `specs[i]` in errors, by input position.
pub fn compile_pure(
    specs: &[Value],
    config: &BackendConfig,
    registry: &ComponentRegistry,
    tokens: Option<&DesignTokens>,
    validator: &Validator,
) -> Result<PureOutput> {
    let inputs = specs
        .iter()
        .enumerate()
        .map(|(i, value)| ScreenInput::new(format!("specs[{i}]"), value.clone()))
        .collect();
    let ctx = CompileContext {
        config,
        registry,
        tokens,
        validator,
    };
    let batch = compile_batch(inputs, ctx)?;
    Ok(PureOutput {
        files: batch.files().cloned().collect(),
        errors: batch.errors,
    })
}

/// Validate and decode one document.
pub(crate) fn check_screen(
    input: &ScreenInput,
    validator: &Validator,
) -> std::result::Result<ScreenSpec, ScreenError> {
    let route = input.route().map(str::to_string);
    let report = validator.validate(&input.value);
    if !report.is_valid() {
        return Err(ScreenError::new(
            &input.source,
            route,
            ScreenErrorKind::Invalid(report),
        ));
    }
    ScreenSpec::from_value(input.value.clone()).map_err(|e| {
        ScreenError::new(&input.source, route, ScreenErrorKind::Decode(e.to_string()))
    })
}

/// Run the whole in-memory pipeline over `inputs`.
pub(crate) fn compile_batch(mut inputs: Vec<ScreenInput>, ctx: CompileContext<'_>) -> Result<Batch> {
    inputs.sort_by(|a, b| a.route().cmp(&b.route()));

    let checked: Vec<_> = inputs
        .par_iter()
        .map(|input| check_screen(input, ctx.validator))
        .collect();

    // Keyed by component name: distinct routes such as `/a` and `/a/` share
    // one and would otherwise overwrite each other's files.
    let mut claimed: HashMap<String, (&str, String)> = HashMap::new();
    let checked: Vec<_> = checked
        .into_iter()
        .zip(&inputs)
        .map(|(result, input)| {
            let spec = result?;
            let name = component_name(&spec.route);
            match claimed.get(&name) {
                Some((first, first_route)) => {
                    let kind = if *first_route == spec.route {
                        ScreenErrorKind::DuplicateRoute {
                            first: first.to_string(),
                        }
                    } else {
                        ScreenErrorKind::NameCollision {
                            first: first.to_string(),
                            first_route: first_route.clone(),
                            component: name,
                        }
                    };
                    Err(ScreenError::new(&input.source, Some(spec.route.clone()), kind))
                }
                None => {
                    claimed.insert(name, (&input.source, spec.route.clone()));
                    Ok(spec)
                }
            }
        })
        .collect();

    let backend = backend_for(ctx.config.framework);
    let emitted: Vec<_> = checked
        .into_par_iter()
        .zip(inputs.par_iter())
        .map(|(result, input)| {
            let spec = result?;
            let resolved = resolve(&spec, ctx.registry, ctx.tokens);
            emit_formatted(backend.as_ref(), &resolved, ctx.config).map_err(|e| {
                ScreenError::new(
                    &input.source,
                    Some(spec.route.clone()),
                    ScreenErrorKind::Emit(e.to_string()),
                )
            })
        })
        .collect();

    let mut batch = Batch::default();
    for result in emitted {
        match result {
            Ok(output) => batch.outputs.push(output),
            Err(error) => {
                tracing::warn!(source = %error.source, "screen skipped: {error}");
                batch.errors.push(error);
            }
        }
    }

    let names: Vec<String> = batch
        .outputs
        .iter()
        .map(|output| output.component_name.clone())
        .collect();
    let mut barrel = backend.emit_barrel_index(&names, ctx.config)?;
    barrel.content = format_output(&barrel.content);
    batch.barrel = Some(barrel);

    Ok(batch)
}
