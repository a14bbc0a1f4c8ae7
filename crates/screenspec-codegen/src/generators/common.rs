//! Tree analysis shared by the backends.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use screenspec_core::{
    format_number, ActionKind, DataSourceKind, Interaction, Node, NodeKind, Style, StyleProperty,
    DIAGNOSTIC_PROP,
};
use serde_json::Value;

/// Font size per heading level on native targets.
pub const HEADING_SIZES: [f64; 6] = [32.0, 24.0, 20.0, 18.0, 16.0, 14.0];

/// Record fields tried, in order, when a list item needs a display label.
pub const LABEL_FIELDS: [&str; 4] = ["label", "title", "name", "text"];

/// What a screen needs from its runtime scaffolding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenFeatures {
    /// Screen state keys written by setState or read by visibleWhen.
    pub state_keys: BTreeSet<String>,
    pub navigates: bool,
    pub submits: bool,
    /// Custom handler names.
    pub handlers: BTreeSet<String>,
    pub responsive: bool,
    /// Ids of nodes bound to an api data source.
    pub remote_lists: Vec<String>,
    pub has_links: bool,
    pub has_forms: bool,
}

impl ScreenFeatures {
    pub fn scan(tree: &Node) -> Self {
        let mut features = Self::default();
        for node in tree.walk() {
            for interaction in [&node.interactions.on_click, &node.interactions.on_change]
                .into_iter()
                .flatten()
            {
                features.note_interaction(node, interaction);
            }
            if let Some(condition) = &node.interactions.visible_when {
                features.state_keys.insert(condition.state.clone());
            }
            if !node.responsive.is_empty() {
                features.responsive = true;
            }
            if consumes_data(&node.kind) && matches!(DataBinding::of(node), Some(DataBinding::Remote { .. })) {
                features.remote_lists.push(node.id.clone());
            }
            match node.kind {
                NodeKind::Link => features.has_links = true,
                NodeKind::Form => {
                    features.has_forms = true;
                    if node.prop_str("action").is_none() {
                        features.submits = true;
                    }
                }
                _ => {}
            }
        }
        features
    }

    fn note_interaction(&mut self, node: &Node, interaction: &Interaction) {
        match interaction.action {
            ActionKind::Navigate => self.navigates |= interaction.target.is_some(),
            ActionKind::Submit => self.submits = true,
            ActionKind::SetState => {
                self.state_keys.insert(action_key(node, interaction).to_string());
            }
            ActionKind::Custom => {
                self.handlers.insert(action_key(node, interaction).to_string());
            }
        }
    }

    /// Whether the screen keeps any local state.
    pub fn has_state(&self) -> bool {
        !self.state_keys.is_empty()
    }

    /// Whether the screen calls back into its host.
    pub fn has_callbacks(&self) -> bool {
        self.submits || !self.handlers.is_empty()
    }
}

/// Kinds that render a data binding.
pub fn consumes_data(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::List | NodeKind::Other(_))
}

/// State key for setState, handler name for custom. Defaults to the node id.
pub fn action_key<'a>(node: &'a Node, interaction: &'a Interaction) -> &'a str {
    interaction.target.as_deref().unwrap_or(&node.id)
}

/// How a node gets its items.
#[derive(Debug, Clone, PartialEq)]
pub enum DataBinding {
    /// Items known at generation time, already mapped.
    Inline(Vec<Value>),
    /// Items fetched at runtime.
    Remote {
        url: String,
        /// Display field to source field.
        mapping: IndexMap<String, String>,
    },
}

impl DataBinding {
    /// The binding of a node: its data source, else its `items` prop.
    pub fn of(node: &Node) -> Option<Self> {
        match &node.data_source {
            Some(source) => match source.kind {
                DataSourceKind::Api => source.url.clone().map(|url| Self::Remote {
                    url,
                    mapping: source.mapping.clone(),
                }),
                DataSourceKind::Static | DataSourceKind::Mock => {
                    let records = match &source.data {
                        Some(Value::Array(items)) => items.clone(),
                        Some(other) => vec![other.clone()],
                        None => Vec::new(),
                    };
                    Some(Self::Inline(
                        records.iter().map(|r| apply_mapping(r, &source.mapping)).collect(),
                    ))
                }
            },
            None => match node.props.get("items") {
                Some(Value::Array(items)) => Some(Self::Inline(items.clone())),
                _ => None,
            },
        }
    }

    /// Source field holding the display label, for remote items.
    pub fn label_field(&self) -> Option<&str> {
        match self {
            Self::Remote { mapping, .. } => mapping.get("label").map(String::as_str),
            Self::Inline(_) => None,
        }
    }
}

/// Copy mapped source fields onto their display names.
fn apply_mapping(record: &Value, mapping: &IndexMap<String, String>) -> Value {
    let Value::Object(fields) = record else {
        return record.clone();
    };
    if mapping.is_empty() {
        return record.clone();
    }
    let mut mapped = fields.clone();
    for (display, source) in mapping {
        if let Some(value) = fields.get(source) {
            mapped.insert(display.clone(), value.clone());
        }
    }
    Value::Object(mapped)
}

/// Display text for a list item.
pub fn item_label(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Object(fields) => LABEL_FIELDS
            .iter()
            .find_map(|key| fields.get(*key))
            .or_else(|| fields.values().find(|v| v.is_string()))
            .map(item_label)
            .unwrap_or_default(),
        Value::Array(_) => item.to_string(),
    }
}

/// `(label, value)` pairs of a Select node.
pub fn select_options(node: &Node) -> Vec<(String, String)> {
    let Some(Value::Array(options)) = node.props.get("options") else {
        return Vec::new();
    };
    options
        .iter()
        .map(|option| match option {
            Value::Object(fields) => {
                let value = fields.get("value").map(item_label);
                let label = fields.get("label").map(item_label);
                match (label, value) {
                    (Some(label), Some(value)) => (label, value),
                    (Some(label), None) => (label.clone(), label),
                    (None, Some(value)) => (value.clone(), value),
                    (None, None) => {
                        let label = item_label(option);
                        (label.clone(), label)
                    }
                }
            }
            other => {
                let label = item_label(other);
                (label.clone(), label)
            }
        })
        .collect()
}

/// Heading level clamped to 1..=6. Defaults to 2.
pub fn heading_level(node: &Node) -> u8 {
    node.prop_f64("level")
        .map(|level| level.round().clamp(1.0, 6.0) as u8)
        .unwrap_or(2)
}

/// Message shown in place of an unresolved ComponentRef.
pub fn diagnostic_text(node: &Node) -> String {
    if let Some(message) = node.prop_str(DIAGNOSTIC_PROP) {
        return message.to_string();
    }
    match node.prop_str("ref") {
        Some(target) => format!("Unresolved component \"{target}\""),
        None => "Unresolved component".to_string(),
    }
}

/// A node's kind defaults on native targets, with its own style merged over them.
pub fn native_style(node: &Node) -> Style {
    use StyleProperty::*;
    let mut style = match &node.kind {
        NodeKind::Card => {
            let card = Style::new()
                .with(Padding, 16.0)
                .with(BorderRadius, 8.0)
                .with(BorderWidth, 1.0)
                .with(BorderColor, "#e5e7eb");
            if node.prop_bool("elevated") == Some(true) {
                card.with(Shadow, "md")
            } else {
                card
            }
        }
        NodeKind::Heading => Style::new()
            .with(FontSize, HEADING_SIZES[usize::from(heading_level(node)) - 1])
            .with(FontWeight, 700.0),
        NodeKind::Text => match node.prop_str("variant") {
            Some("caption") => Style::new().with(FontSize, 14.0),
            Some("label") => Style::new().with(FontSize, 14.0).with(FontWeight, 500.0),
            Some("muted") => Style::new().with(Color, "#6b7280"),
            _ => Style::new(),
        },
        NodeKind::ComponentRef => Style::new()
            .with(Padding, 8.0)
            .with(BorderWidth, 1.0)
            .with(BorderColor, "#f87171")
            .with(Color, "#dc2626"),
        _ => Style::new(),
    };
    style.merge(&node.style);
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenspec_core::ScreenSpec;
    use serde_json::json;

    fn screen(tree: Value) -> ScreenSpec {
        ScreenSpec::from_value(json!({"version": 1, "route": "/x", "tree": tree})).unwrap()
    }

    #[test]
    fn test_scan_features() {
        let spec = screen(json!({
            "id": "root",
            "type": "Stack",
            "children": [
                {"id": "go", "type": "Button", "props": {"label": "Go"},
                 "interactions": {"onClick": {"action": "navigate", "target": "/next"}}},
                {"id": "tab", "type": "Button", "props": {"label": "Tab"},
                 "interactions": {"onClick": {"action": "setState", "target": "tab", "value": "b"}}},
                {"id": "panel", "type": "Text", "props": {"text": "B"},
                 "interactions": {"visibleWhen": {"state": "open"}},
                 "responsive": {"mobile": {"padding": 4}}},
                {"id": "share", "type": "Button", "props": {"label": "Share"},
                 "interactions": {"onClick": {"action": "custom", "target": "share"}}},
                {"id": "feed", "type": "List", "dataSource": {"type": "api", "url": "https://x.test/items"}}
            ]
        }));
        let features = ScreenFeatures::scan(&spec.tree);

        assert!(features.navigates);
        assert!(!features.submits);
        assert_eq!(features.state_keys.iter().collect::<Vec<_>>(), vec!["open", "tab"]);
        assert_eq!(features.handlers.iter().collect::<Vec<_>>(), vec!["share"]);
        assert!(features.responsive);
        assert_eq!(features.remote_lists, vec!["feed"]);
    }

    #[test]
    fn test_static_binding_applies_mapping() {
        let spec = screen(json!({
            "id": "people", "type": "List",
            "dataSource": {"type": "static", "data": [{"fullName": "Ada"}], "mapping": {"label": "fullName"}}
        }));
        let Some(DataBinding::Inline(items)) = DataBinding::of(&spec.tree) else {
            panic!("expected inline data");
        };
        assert_eq!(item_label(&items[0]), "Ada");
    }

    #[test]
    fn test_items_prop_binding() {
        let spec = screen(json!({"id": "l", "type": "List", "props": {"items": ["a", 2]}}));
        let binding = DataBinding::of(&spec.tree).unwrap();
        assert_eq!(binding, DataBinding::Inline(vec![json!("a"), json!(2)]));
    }

    #[test]
    fn test_select_options() {
        let spec = screen(json!({
            "id": "plan", "type": "Select",
            "props": {"options": ["free", {"label": "Pro plan", "value": "pro"}]}
        }));
        assert_eq!(
            select_options(&spec.tree),
            vec![("free".to_string(), "free".to_string()), ("Pro plan".to_string(), "pro".to_string())]
        );
    }

    #[test]
    fn test_heading_level_clamped() {
        let node = Node::new("h", "Heading").with_prop("level", 9);
        assert_eq!(heading_level(&node), 6);
        assert_eq!(heading_level(&Node::new("h", "Heading")), 2);
    }

    #[test]
    fn test_native_style_merges_node_style() {
        let card = Node::new("c", "Card")
            .with_prop("elevated", true)
            .with_style(Style::new().with(StyleProperty::Padding, 24.0));
        let style = native_style(&card);
        assert_eq!(style.get(StyleProperty::Padding).and_then(|v| v.as_number()), Some(24.0));
        assert_eq!(style.get(StyleProperty::Shadow).and_then(|v| v.as_text()), Some("md"));

        let heading = Node::new("h", "Heading").with_prop("level", 1);
        assert_eq!(native_style(&heading).get(StyleProperty::FontSize).and_then(|v| v.as_number()), Some(32.0));
    }

    #[test]
    fn test_diagnostic_text() {
        let node = Node::new("r", "ComponentRef").with_prop("ref", "card");
        assert_eq!(diagnostic_text(&node), "Unresolved component \"card\"");
        let node = node.with_prop(DIAGNOSTIC_PROP, "Circular reference: a -> a");
        assert_eq!(diagnostic_text(&node), "Circular reference: a -> a");
    }
}
