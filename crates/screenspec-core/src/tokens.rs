//! Design token table.
//!
//! Tokens are grouped maps (`spacing`, `size`, `color`, `typography.*`,
//! `borderRadius`, `shadow`) whose leaves are `{ "value": ..., "type": ... }`
//! objects. Style values refer to them as `$group.name`.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::errors::{ModelError, Result};

/// Prefix marking a style value as a token reference.
pub const TOKEN_SIGIL: char = '$';

/// Separator between token path segments.
pub const TOKEN_SEPARATOR: char = '.';

/// Well-known top-level token groups.
pub const TOKEN_GROUPS: [&str; 7] = [
    "spacing",
    "size",
    "color",
    "typography",
    "borderRadius",
    "shadow",
    "opacity",
];

/// A loaded design token table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignTokens {
    root: Map<String, Value>,
}

impl DesignTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ModelError::InvalidTokens(format!(
                "expected an object at the top level, found {}",
                crate::model::json_type_name(&other)
            ))),
        }
    }

    /// Parse from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Load a token file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ModelError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Walk `segments` through the table and return whatever sits there.
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = segments.into_iter();
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Insert a leaf at a dotted path, creating groups as needed.
    pub fn insert(&mut self, path: &str, value: Value, token_type: &str) {
        let mut segments: Vec<&str> = path.split(TOKEN_SEPARATOR).collect();
        let Some(last) = segments.pop() else {
            return;
        };
        let mut group = &mut self.root;
        for segment in segments {
            let entry = group
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            group = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        let mut leaf = Map::new();
        leaf.insert("value".to_string(), value);
        leaf.insert("type".to_string(), Value::String(token_type.to_string()));
        group.insert(last.to_string(), Value::Object(leaf));
    }

    /// Flatten every `{value}` leaf into a dotted path map.
    pub fn flatten(&self) -> IndexMap<String, Value> {
        let mut out = IndexMap::new();
        for (key, value) in &self.root {
            flatten_into(key, value, &mut out);
        }
        out
    }

    /// A top-level group.
    pub fn group(&self, name: &str) -> Option<&Map<String, Value>> {
        self.root.get(name).and_then(Value::as_object)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn flatten_into(prefix: &str, value: &Value, out: &mut IndexMap<String, Value>) {
    match value {
        Value::Object(map) if map.contains_key("value") => {
            if let Some(leaf) = map.get("value") {
                out.insert(prefix.to_string(), leaf.clone());
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(&format!("{prefix}{TOKEN_SEPARATOR}{key}"), child, out);
            }
        }
        other => {
            out.insert(prefix.to_string(), other.clone());
        }
    }
}
