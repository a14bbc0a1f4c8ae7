//! Hand-written rules used when no schema document is available.

use screenspec_core::{json_type_name, NodeKind, StyleProperty, SPEC_VERSION};
use serde_json::{Map, Value};

use crate::builtins;
use crate::report::{child_path, index_path, ValidationIssue};

const SCREEN_FIELDS: [&str; 4] = ["version", "route", "meta", "tree"];
const NODE_FIELDS: [&str; 8] = [
    "id",
    "type",
    "props",
    "children",
    "style",
    "responsive",
    "interactions",
    "dataSource",
];
const ACTIONS: [&str; 4] = ["navigate", "submit", "setState", "custom"];
const DATA_SOURCE_KINDS: [&str; 3] = ["static", "api", "mock"];

/// Check a raw screen document against the built-in rules.
pub fn validate_fallback(instance: &Value) -> Vec<ValidationIssue> {
    let mut rules = Rules::default();
    rules.screen(instance);
    rules.issues
}

#[derive(Default)]
struct Rules {
    issues: Vec<ValidationIssue>,
}

impl Rules {
    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    fn expect_object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.issue(path, format!("expected object, found {}", json_type_name(value)));
        }
        object
    }

    fn expect_string<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v str> {
        let text = value.as_str();
        if text.is_none() {
            self.issue(path, format!("expected string, found {}", json_type_name(value)));
        }
        text
    }

    fn unexpected_fields(&mut self, object: &Map<String, Value>, allowed: &[&str], path: &str) {
        for key in object.keys().filter(|k| !allowed.contains(&k.as_str())) {
            self.issue(path, format!("unexpected property \"{key}\""));
        }
    }

    fn screen(&mut self, value: &Value) {
        let Some(screen) = self.expect_object(value, "") else {
            return;
        };
        self.unexpected_fields(screen, &SCREEN_FIELDS, "");

        match screen.get("version") {
            None => self.issue("", "missing required property \"version\""),
            Some(v) if v.as_u64() == Some(u64::from(SPEC_VERSION)) => {}
            Some(v) => self.issue("/version", format!("unsupported version {v}, expected {SPEC_VERSION}")),
        }

        match screen.get("route") {
            None => self.issue("", "missing required property \"route\""),
            Some(route) => {
                if let Some(route) = self.expect_string(route, "/route") {
                    self.route(route);
                }
            }
        }

        if let Some(meta) = screen.get("meta") {
            self.meta(meta);
        }

        match screen.get("tree") {
            None => self.issue("", "missing required property \"tree\""),
            Some(tree) => self.node(tree, "/tree"),
        }
    }

    fn route(&mut self, route: &str) {
        if !route.starts_with('/') {
            self.issue("/route", format!("route \"{route}\" must start with \"/\""));
        }
        if route.chars().any(char::is_whitespace) {
            self.issue("/route", format!("route \"{route}\" must not contain whitespace"));
        }
        if route.contains("//") {
            self.issue("/route", format!("route \"{route}\" must not contain empty segments"));
        }
    }

    fn meta(&mut self, value: &Value) {
        let Some(meta) = self.expect_object(value, "/meta") else {
            return;
        };
        for (key, value) in meta {
            let path = child_path("/meta", key);
            match key.as_str() {
                "layout" | "title" => {
                    self.expect_string(value, &path);
                }
                "auth" if !value.is_boolean() => {
                    self.issue(&path, format!("expected boolean, found {}", json_type_name(value)));
                }
                "auth" => {}
                _ => self.issue("/meta", format!("unexpected property \"{key}\"")),
            }
        }
    }

    fn node(&mut self, value: &Value, path: &str) {
        let Some(node) = self.expect_object(value, path) else {
            return;
        };
        self.unexpected_fields(node, &NODE_FIELDS, path);

        match node.get("id") {
            None => self.issue(path, "missing required property \"id\""),
            Some(id) => self.non_empty_string(id, &child_path(path, "id")),
        }

        let kind = match node.get("type") {
            None => {
                self.issue(path, "missing required property \"type\"");
                None
            }
            Some(tag) => {
                self.non_empty_string(tag, &child_path(path, "type"));
                tag.as_str().filter(|t| !t.is_empty()).map(NodeKind::from_tag)
            }
        };

        let props_path = child_path(path, "props");
        let empty = Map::new();
        let props = match node.get("props") {
            None => Some(&empty),
            Some(props) => self.expect_object(props, &props_path),
        };
        if let (Some(kind), Some(props)) = (kind.as_ref(), props) {
            self.props(kind, props, &props_path);
        }

        if let Some(children) = node.get("children") {
            let children_path = child_path(path, "children");
            match children.as_array() {
                Some(children) => {
                    for (index, child) in children.iter().enumerate() {
                        self.node(child, &index_path(&children_path, index));
                    }
                }
                None => self.issue(
                    &children_path,
                    format!("expected array, found {}", json_type_name(children)),
                ),
            }
        }

        if let Some(style) = node.get("style") {
            self.style(style, &child_path(path, "style"));
        }
        if let Some(responsive) = node.get("responsive") {
            self.responsive(responsive, &child_path(path, "responsive"));
        }
        if let Some(interactions) = node.get("interactions") {
            self.interactions(interactions, &child_path(path, "interactions"));
        }
        if let Some(source) = node.get("dataSource") {
            self.data_source(source, &child_path(path, "dataSource"));
        }
    }

    fn non_empty_string(&mut self, value: &Value, path: &str) {
        if let Some(text) = self.expect_string(value, path) {
            if text.is_empty() {
                self.issue(path, "must not be empty");
            }
        }
    }

    fn props(&mut self, kind: &NodeKind, props: &Map<String, Value>, path: &str) {
        let Some(table) = builtins::props_for(kind) else {
            return;
        };

        for (name, value) in props {
            let Some(spec) = builtins::lookup(kind, name) else {
                self.issue(path, format!("unknown prop \"{name}\" for {kind}"));
                continue;
            };
            let prop_path = child_path(path, name);
            if !spec.ty.matches(value) {
                self.issue(
                    &prop_path,
                    format!("expected {}, found {}", spec.ty.name(), json_type_name(value)),
                );
            } else if let Some(text) = value.as_str() {
                if !spec.values.is_empty() && !spec.values.contains(&text) {
                    self.issue(
                        &prop_path,
                        format!("\"{text}\" is not one of {}", spec.values.join(", ")),
                    );
                }
            }
        }

        for spec in table.iter().filter(|s| s.required) {
            if !props.contains_key(spec.name) {
                self.issue(path, format!("missing required prop \"{}\" for {kind}", spec.name));
            }
        }
    }

    fn style(&mut self, value: &Value, path: &str) {
        let Some(style) = self.expect_object(value, path) else {
            return;
        };
        for (key, value) in style {
            if StyleProperty::from_key(key).is_none() {
                self.issue(path, format!("unknown style property \"{key}\""));
            } else if !(value.is_number() || value.is_string()) {
                self.issue(
                    &child_path(path, key),
                    format!("expected number or string, found {}", json_type_name(value)),
                );
            }
        }
    }

    fn responsive(&mut self, value: &Value, path: &str) {
        let Some(responsive) = self.expect_object(value, path) else {
            return;
        };
        for (key, style) in responsive {
            match key.as_str() {
                "tablet" | "mobile" => self.style(style, &child_path(path, key)),
                _ => self.issue(path, format!("unknown breakpoint \"{key}\"")),
            }
        }
    }

    fn interactions(&mut self, value: &Value, path: &str) {
        let Some(interactions) = self.expect_object(value, path) else {
            return;
        };
        for (key, value) in interactions {
            let entry_path = child_path(path, key);
            match key.as_str() {
                "onClick" | "onChange" => self.interaction(value, &entry_path),
                "visibleWhen" => self.condition(value, &entry_path),
                _ => self.issue(path, format!("unexpected property \"{key}\"")),
            }
        }
    }

    fn interaction(&mut self, value: &Value, path: &str) {
        let Some(interaction) = self.expect_object(value, path) else {
            return;
        };
        self.unexpected_fields(interaction, &["action", "target", "value"], path);

        let action = match interaction.get("action") {
            None => {
                self.issue(path, "missing required property \"action\"");
                None
            }
            Some(action) => self.expect_string(action, &child_path(path, "action")),
        };
        if let Some(action) = action {
            if !ACTIONS.contains(&action) {
                self.issue(
                    &child_path(path, "action"),
                    format!("\"{action}\" is not one of {}", ACTIONS.join(", ")),
                );
            }
        }

        match interaction.get("target") {
            Some(target) => {
                self.expect_string(target, &child_path(path, "target"));
            }
            None if action == Some("navigate") => {
                self.issue(path, "missing required property \"target\"");
            }
            None => {}
        }
    }

    fn condition(&mut self, value: &Value, path: &str) {
        let Some(condition) = self.expect_object(value, path) else {
            return;
        };
        self.unexpected_fields(condition, &["state", "equals"], path);
        match condition.get("state") {
            None => self.issue(path, "missing required property \"state\""),
            Some(state) => self.non_empty_string(state, &child_path(path, "state")),
        }
    }

    fn data_source(&mut self, value: &Value, path: &str) {
        let Some(source) = self.expect_object(value, path) else {
            return;
        };
        self.unexpected_fields(source, &["type", "url", "data", "mapping"], path);

        let kind = match source.get("type") {
            None => {
                self.issue(path, "missing required property \"type\"");
                None
            }
            Some(kind) => self.expect_string(kind, &child_path(path, "type")),
        };
        if let Some(kind) = kind {
            if !DATA_SOURCE_KINDS.contains(&kind) {
                self.issue(
                    &child_path(path, "type"),
                    format!("\"{kind}\" is not one of {}", DATA_SOURCE_KINDS.join(", ")),
                );
            }
        }

        match source.get("url") {
            Some(url) => {
                self.expect_string(url, &child_path(path, "url"));
            }
            None if kind == Some("api") => self.issue(path, "missing required property \"url\""),
            None => {}
        }

        if let Some(mapping) = source.get("mapping") {
            let mapping_path = child_path(path, "mapping");
            if let Some(mapping) = self.expect_object(mapping, &mapping_path) {
                for (key, target) in mapping {
                    self.expect_string(target, &child_path(&mapping_path, key));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screen(tree: Value) -> Value {
        json!({"version": 1, "route": "/home", "tree": tree})
    }

    fn messages(instance: &Value) -> Vec<String> {
        validate_fallback(instance).iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_valid_screen() {
        let doc = json!({
            "version": 1,
            "route": "/settings/[id]",
            "meta": {"title": "Settings", "auth": true},
            "tree": {
                "id": "root",
                "type": "Stack",
                "props": {"direction": "column"},
                "style": {"gap": "$spacing.md", "padding": 16},
                "responsive": {"mobile": {"padding": 8}},
                "children": [
                    {"id": "title", "type": "Heading", "props": {"text": "Settings", "level": 1}},
                    {
                        "id": "save",
                        "type": "Button",
                        "props": {"label": "Save", "variant": "primary"},
                        "interactions": {"onClick": {"action": "navigate", "target": "/done"}}
                    },
                    {
                        "id": "items",
                        "type": "List",
                        "dataSource": {"type": "api", "url": "/api/items", "mapping": {"title": "name"}}
                    },
                    {"id": "chart", "type": "SalesChart", "props": {"anything": [1, 2, 3]}}
                ]
            }
        });
        assert_eq!(messages(&doc), Vec::<String>::new());
    }

    #[test]
    fn test_version_must_be_one() {
        let mut doc = screen(json!({"id": "r", "type": "Stack"}));
        doc["version"] = json!(2);
        assert_eq!(messages(&doc), vec!["/version: unsupported version 2, expected 1"]);
    }

    #[test]
    fn test_route_shape() {
        for (route, expected) in [
            ("home", "must start with"),
            ("/my page", "whitespace"),
            ("/a//b", "empty segments"),
        ] {
            let mut doc = screen(json!({"id": "r", "type": "Stack"}));
            doc["route"] = json!(route);
            let found = messages(&doc);
            assert_eq!(found.len(), 1, "{route}: {found:?}");
            assert!(found[0].contains(expected), "{route}: {found:?}");
        }
    }

    #[test]
    fn test_unknown_prop_fails_closed() {
        let doc = screen(json!({"id": "t", "type": "Text", "props": {"text": "hi", "href": "/x"}}));
        assert_eq!(messages(&doc), vec!["/tree/props: unknown prop \"href\" for Text"]);
    }

    #[test]
    fn test_required_type_and_enum() {
        let doc = screen(json!({
            "id": "root",
            "type": "Stack",
            "children": [
                {"id": "b", "type": "Button", "props": {"variant": "loud"}},
                {"id": "i", "type": "Image", "props": {"src": 42}}
            ]
        }));
        assert_eq!(
            messages(&doc),
            vec![
                "/tree/children/0/props/variant: \"loud\" is not one of primary, secondary, outline, ghost, destructive",
                "/tree/children/0/props: missing required prop \"label\" for Button",
                "/tree/children/1/props/src: expected string, found number",
            ]
        );
    }

    #[test]
    fn test_missing_props_object_still_checks_required() {
        let doc = screen(json!({"id": "t", "type": "Text"}));
        assert_eq!(messages(&doc), vec!["/tree/props: missing required prop \"text\" for Text"]);
    }

    #[test]
    fn test_node_identity() {
        let doc = screen(json!({"id": "", "type": "Stack", "children": [{"type": "Text"}]}));
        let found = messages(&doc);
        assert!(found.contains(&"/tree/id: must not be empty".to_string()));
        assert!(found.contains(&"/tree/children/0: missing required property \"id\"".to_string()));
    }

    #[test]
    fn test_container_field_types() {
        let doc = screen(json!({"id": "r", "type": "Stack", "children": {}, "style": [], "props": "x"}));
        assert_eq!(
            messages(&doc),
            vec![
                "/tree/props: expected object, found string",
                "/tree/children: expected array, found object",
                "/tree/style: expected object, found array",
            ]
        );
    }

    #[test]
    fn test_unknown_style_key() {
        let doc = screen(json!({"id": "r", "type": "Stack", "style": {"padding": 4, "glow": 1}}));
        assert_eq!(messages(&doc), vec!["/tree/style: unknown style property \"glow\""]);
    }

    #[test]
    fn test_interaction_and_data_source_rules() {
        let doc = screen(json!({
            "id": "r",
            "type": "List",
            "interactions": {"onClick": {"action": "navigate"}, "visibleWhen": {"state": ""}},
            "dataSource": {"type": "api"}
        }));
        assert_eq!(
            messages(&doc),
            vec![
                "/tree/interactions/onClick: missing required property \"target\"",
                "/tree/interactions/visibleWhen/state: must not be empty",
                "/tree/dataSource: missing required property \"url\"",
            ]
        );
    }

    #[test]
    fn test_non_object_document() {
        assert_eq!(messages(&json!("nope")), vec!["/: expected object, found string"]);
    }
}
