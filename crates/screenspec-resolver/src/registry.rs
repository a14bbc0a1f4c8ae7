//! Component registry for storing and looking up component definitions.

use std::path::Path;

use indexmap::IndexMap;
use screenspec_core::{ComponentDef, Result};

/// A registry of component definitions keyed by definition id.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: IndexMap<String, ComponentDef>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of definitions. Later ids win.
    pub fn from_defs(defs: impl IntoIterator<Item = ComponentDef>) -> Self {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def);
        }
        registry
    }

    /// Load definitions from a JSON file (array, or object keyed by id).
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_defs(ComponentDef::load_all(path)?))
    }

    /// Register a component definition, replacing any with the same id.
    pub fn register(&mut self, component: ComponentDef) {
        self.components.insert(component.id.clone(), component);
    }

    /// Builder-style registration.
    pub fn with(mut self, component: ComponentDef) -> Self {
        self.register(component);
        self
    }

    /// Remove a definition. Existing references are left dangling.
    pub fn remove(&mut self, id: &str) -> Option<ComponentDef> {
        self.components.shift_remove(id)
    }

    /// Get a component by id.
    pub fn get(&self, id: &str) -> Option<&ComponentDef> {
        self.components.get(id)
    }

    /// Check if a component exists.
    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Get all component ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|s| s.as_str())
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
