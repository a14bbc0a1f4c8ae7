//! Token and reference resolution for screenspec documents.
//!
//! This crate resolves:
//! - ComponentRef nodes into concrete subtrees (override merging, slots)
//! - Token references (`$color.primary` -> `#3366ff`) in style bags
//!
//! Neither step fails: missing definitions become diagnostic placeholders
//! and missing tokens keep their literal text.

mod references;
mod registry;
mod tokens;

pub use references::{resolve_references, ReferenceResolver, MAX_EXPANSION_DEPTH};
pub use registry::ComponentRegistry;
pub use tokens::{
    resolve_style, resolve_token, resolve_tree_tokens, resolve_value_or_literal, TokenResolver,
};

use screenspec_core::{DesignTokens, ScreenSpec};

/// Expand every ComponentRef and resolve every token reference in a screen.
pub fn resolve(
    spec: &ScreenSpec,
    registry: &ComponentRegistry,
    tokens: Option<&DesignTokens>,
) -> ScreenSpec {
    let tree = resolve_references(&spec.tree, registry);
    let tree = resolve_tree_tokens(&tree, tokens);
    ScreenSpec {
        version: spec.version,
        route: spec.route.clone(),
        meta: spec.meta.clone(),
        tree,
    }
}
