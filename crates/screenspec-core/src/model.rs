//! Screen, node, and component definition types.
//!
//! These mirror the JSON documents one to one. Unknown node types are kept
//! as [`NodeKind::Other`] so externally supplied components survive a
//! load/save round trip untouched.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::{ModelError, Result};
use crate::style::{Responsive, Style};

/// The flat, ordered attribute bag of a node.
pub type Props = IndexMap<String, Value>;

/// The only spec version this crate understands.
pub const SPEC_VERSION: u32 = 1;

/// Prop that marks a node inside a component definition as a slot.
pub const SLOT_PROP: &str = "slot";

/// Prop that carries a diagnostic message on an unresolved reference.
pub const DIAGNOSTIC_PROP: &str = "diagnostic";

/// The type tag of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Container,
    Stack,
    Grid,
    Card,
    Text,
    Heading,
    Button,
    Link,
    Image,
    Input,
    Textarea,
    Select,
    Checkbox,
    Divider,
    Spacer,
    List,
    Form,
    ComponentRef,
    /// An externally supplied component name.
    Other(String),
}

impl NodeKind {
    /// Every built-in kind.
    pub const BUILTINS: [NodeKind; 18] = [
        Self::Container,
        Self::Stack,
        Self::Grid,
        Self::Card,
        Self::Text,
        Self::Heading,
        Self::Button,
        Self::Link,
        Self::Image,
        Self::Input,
        Self::Textarea,
        Self::Select,
        Self::Checkbox,
        Self::Divider,
        Self::Spacer,
        Self::List,
        Self::Form,
        Self::ComponentRef,
    ];

    /// Parse a type tag. Unknown tags become [`NodeKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        Self::BUILTINS
            .iter()
            .find(|k| k.as_str() == tag)
            .cloned()
            .unwrap_or_else(|| Self::Other(tag.to_string()))
    }

    /// The tag string used in JSON documents.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Container => "Container",
            Self::Stack => "Stack",
            Self::Grid => "Grid",
            Self::Card => "Card",
            Self::Text => "Text",
            Self::Heading => "Heading",
            Self::Button => "Button",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::Input => "Input",
            Self::Textarea => "Textarea",
            Self::Select => "Select",
            Self::Checkbox => "Checkbox",
            Self::Divider => "Divider",
            Self::Spacer => "Spacer",
            Self::List => "List",
            Self::Form => "Form",
            Self::ComponentRef => "ComponentRef",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Kinds that lay out children.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Container | Self::Stack | Self::Grid | Self::Card | Self::Form | Self::List
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// One element of the screen tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Responsive::is_empty")]
    pub responsive: Responsive,
    #[serde(default, skip_serializing_if = "Interactions::is_empty")]
    pub interactions: Interactions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
}

impl Node {
    /// Create a node with no props, children, or style.
    pub fn new(id: impl Into<String>, kind: impl Into<NodeKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: Props::new(),
            children: Vec::new(),
            style: Style::default(),
            responsive: Responsive::default(),
            interactions: Interactions::default(),
            data_source: None,
        }
    }

    /// Builder-style prop setter.
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style style setter.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Get a string prop.
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_str)
    }

    /// Get a boolean prop.
    pub fn prop_bool(&self, name: &str) -> Option<bool> {
        self.props.get(name).and_then(Value::as_bool)
    }

    /// Get a numeric prop.
    pub fn prop_f64(&self, name: &str) -> Option<f64> {
        self.props.get(name).and_then(Value::as_f64)
    }

    /// Shallow-merge a prop patch into this node.
    pub fn merge_props(&mut self, patch: &Props) {
        for (key, value) in patch {
            self.props.insert(key.clone(), value.clone());
        }
    }

    /// Slot name declared by this node, if any.
    pub fn slot_name(&self) -> Option<&str> {
        self.prop_str(SLOT_PROP)
    }

    pub fn is_component_ref(&self) -> bool {
        self.kind == NodeKind::ComponentRef
    }

    /// Decode the props of a ComponentRef node.
    ///
    /// Returns `None` for any other kind.
    pub fn component_ref(&self) -> Option<std::result::Result<ComponentRefProps, serde_json::Error>> {
        if !self.is_component_ref() {
            return None;
        }
        let props = Value::Object(self.props.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
        Some(serde_json::from_value(props))
    }
}

/// The props of a ComponentRef node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRefProps {
    #[serde(rename = "ref")]
    pub target: String,
    /// Root prop overrides.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub overrides: Props,
    /// Root style overrides.
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub style_overrides: Style,
    /// Overrides addressed by node id inside the definition.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub descendants: IndexMap<String, DescendantOverride>,
    /// Replacement children keyed by slot name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slot_content: IndexMap<String, Vec<Node>>,
}

impl ComponentRefProps {
    /// A reference with no overrides.
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Encode back into a node prop bag.
    pub fn to_props(&self) -> Props {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            _ => Props::new(),
        }
    }
}

/// Per-descendant override inside a ComponentRef.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescendantOverride {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub style: Style,
}

/// Interaction descriptors attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interactions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click: Option<Interaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_change: Option<Interaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Condition>,
}

impl Interactions {
    pub fn is_empty(&self) -> bool {
        self.on_click.is_none() && self.on_change.is_none() && self.visible_when.is_none()
    }
}

/// What happens when an interaction fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Navigate,
    Submit,
    SetState,
    Custom,
}

/// An event handler descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub action: ActionKind,
    /// Route for navigate, state key for setState, handler name for custom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// A visibility condition on a piece of screen state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
}

/// Where a node's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Static,
    Api,
    Mock,
}

/// Data binding descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    #[serde(rename = "type")]
    pub kind: DataSourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Field renames from source records to display fields.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, String>,
}

/// Screen level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A complete screen document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSpec {
    pub version: u32,
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ScreenMeta>,
    pub tree: Node,
}

impl ScreenSpec {
    /// Create a screen with the current spec version.
    pub fn new(route: impl Into<String>, tree: Node) -> Self {
        Self {
            version: SPEC_VERSION,
            route: route.into(),
            meta: None,
            tree,
        }
    }

    /// Parse from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A reusable named subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub id: String,
    pub name: String,
    pub tree: Node,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,
}

impl ComponentDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tree: Node) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tree,
            slots: Vec::new(),
        }
    }

    /// Load a list of definitions from a JSON file.
    ///
    /// Accepts either an array of definitions or an object keyed by id.
    pub fn load_all(path: &Path) -> Result<Vec<ComponentDef>> {
        let text = std::fs::read_to_string(path).map_err(|e| ModelError::io(path, e))?;
        let value: Value = serde_json::from_str(&text)?;
        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            Value::Object(map) => map
                .into_iter()
                .map(|(_, def)| serde_json::from_value(def).map_err(ModelError::from))
                .collect(),
            other => Err(ModelError::InvalidRegistry(format!(
                "expected an array or object, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

/// Human readable JSON type name.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{StyleProperty, StyleValue};
    use serde_json::json;

    #[test]
    fn test_parse_screen() {
        let spec = ScreenSpec::from_value(json!({
            "version": 1,
            "route": "/settings",
            "meta": {"layout": "default", "auth": true},
            "tree": {
                "id": "root",
                "type": "Stack",
                "style": {"gap": "$spacing.md"},
                "children": [
                    {"id": "title", "type": "Heading", "props": {"text": "Settings", "level": 1}},
                    {"id": "chart", "type": "SalesChart", "props": {"range": "7d"}}
                ]
            }
        }))
        .unwrap();

        assert_eq!(spec.route, "/settings");
        assert_eq!(spec.tree.kind, NodeKind::Stack);
        assert_eq!(spec.tree.children[1].kind, NodeKind::Other("SalesChart".to_string()));
        assert_eq!(
            spec.tree.style.get(StyleProperty::Gap),
            Some(&StyleValue::from("$spacing.md"))
        );
    }

    #[test]
    fn test_other_kind_round_trips_tag() {
        let node = Node::new("x", "DatePicker");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({"id": "x", "type": "DatePicker"}));
    }

    #[test]
    fn test_component_ref_props() {
        let node = Node::new("card_1", NodeKind::ComponentRef)
            .with_prop("ref", "comp_card")
            .with_prop("overrides", json!({"title": "Hello"}))
            .with_prop("descendants", json!({"body": {"props": {"text": "x"}}}));

        let props = node.component_ref().unwrap().unwrap();
        assert_eq!(props.target, "comp_card");
        assert_eq!(props.overrides.get("title"), Some(&json!("Hello")));
        assert!(props.descendants.contains_key("body"));
    }

    #[test]
    fn test_component_ref_on_other_kind() {
        assert!(Node::new("a", NodeKind::Text).component_ref().is_none());
    }

    #[test]
    fn test_interactions_parse() {
        let node: Node = serde_json::from_value(json!({
            "id": "b",
            "type": "Button",
            "interactions": {
                "onClick": {"action": "navigate", "target": "/home"},
                "visibleWhen": {"state": "loggedIn", "equals": true}
            }
        }))
        .unwrap();

        let click = node.interactions.on_click.unwrap();
        assert_eq!(click.action, ActionKind::Navigate);
        assert_eq!(click.target.as_deref(), Some("/home"));
        assert_eq!(node.interactions.visible_when.unwrap().state, "loggedIn");
    }

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(NodeKind::from_tag("Button"), NodeKind::Button);
        assert!(!NodeKind::from_tag("button").is_builtin());
    }
}
