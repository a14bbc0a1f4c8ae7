//! A JSON Schema subset evaluator.
//!
//! Supports `type`, `properties`, `required`, `additionalProperties`,
//! `items`, `enum`, `const`, `pattern`, `minLength`, `minimum`, `maximum`,
//! `minItems`, local `$ref`, `allOf`, `anyOf`, `oneOf`, `not` and
//! `if`/`then`/`else`. Unknown keywords are ignored.

use std::collections::HashMap;

use regex::Regex;
use screenspec_core::json_type_name;
use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};
use crate::report::{child_path, index_path, ValidationIssue};

/// The schema shipped with this crate.
pub const BUNDLED_SCHEMA: &str = include_str!("../schema/screen.schema.json");

/// Maximum consecutive `$ref` hops at one instance location.
///
/// The count restarts whenever evaluation moves into a child value, so only
/// reference loops that never consume input hit it.
const MAX_REF_DEPTH: usize = 128;

/// A parsed schema document with its patterns precompiled.
#[derive(Debug, Clone)]
pub struct JsonSchema {
    root: Value,
    patterns: HashMap<String, Regex>,
}

impl JsonSchema {
    pub fn new(root: Value) -> Result<Self> {
        if !(root.is_object() || root.is_boolean()) {
            return Err(ValidationError::InvalidSchema(format!(
                "schema root must be an object, found {}",
                json_type_name(&root)
            )));
        }
        let mut patterns = HashMap::new();
        collect_patterns(&root, &mut patterns)?;
        Ok(Self { root, patterns })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Self::new(serde_json::from_str(text)?)
    }

    /// The schema shipped with this crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_SCHEMA)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Every violated constraint, in document order.
    pub fn validate(&self, instance: &Value) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        self.eval(&self.root, instance, "", 0, &mut issues);
        issues
    }

    fn is_valid_at(&self, schema: &Value, instance: &Value, path: &str, depth: usize) -> bool {
        let mut scratch = Vec::new();
        self.eval(schema, instance, path, depth, &mut scratch);
        scratch.is_empty()
    }

    fn eval(&self, schema: &Value, instance: &Value, path: &str, depth: usize, issues: &mut Vec<ValidationIssue>) {
        let schema = match schema {
            Value::Bool(true) => return,
            Value::Bool(false) => {
                issues.push(ValidationIssue::new(path, "no value is allowed here"));
                return;
            }
            Value::Object(schema) => schema,
            _ => return,
        };

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            if depth >= MAX_REF_DEPTH {
                issues.push(ValidationIssue::new(path, "schema reference depth exceeded"));
                return;
            }
            match self.resolve_ref(reference) {
                Some(target) => self.eval(target, instance, path, depth + 1, issues),
                None => issues.push(ValidationIssue::new(
                    path,
                    format!("unresolvable schema reference {reference}"),
                )),
            }
        }

        if let Some(expected) = schema.get("type") {
            if !type_matches(expected, instance) {
                issues.push(ValidationIssue::new(
                    path,
                    format!("expected {}, found {}", describe_type(expected), json_type_name(instance)),
                ));
                // Keyword checks below assume the right type.
                return;
            }
        }

        if let Some(Value::Array(allowed)) = schema.get("enum") {
            if !allowed.iter().any(|v| v == instance) {
                let list: Vec<String> = allowed.iter().map(Value::to_string).collect();
                issues.push(ValidationIssue::new(
                    path,
                    format!("{instance} is not one of {}", list.join(", ")),
                ));
            }
        }

        if let Some(expected) = schema.get("const") {
            if expected != instance {
                issues.push(ValidationIssue::new(path, format!("expected {expected}, found {instance}")));
            }
        }

        match instance {
            Value::Object(object) => self.eval_object(schema, object, path, issues),
            Value::Array(items) => self.eval_array(schema, items, path, issues),
            Value::String(text) => self.eval_string(schema, text, path, issues),
            Value::Number(number) => {
                if let Some(n) = number.as_f64() {
                    eval_number(schema, n, path, issues);
                }
            }
            _ => {}
        }

        self.eval_combinators(schema, instance, path, depth, issues);
    }

    fn eval_object(
        &self,
        schema: &Map<String, Value>,
        object: &Map<String, Value>,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(Value::Array(required)) = schema.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(name) {
                    issues.push(ValidationIssue::new(path, format!("missing required property \"{name}\"")));
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        for (name, value) in object {
            let value_path = child_path(path, name);
            match properties.and_then(|p| p.get(name)) {
                Some(sub) => self.eval(sub, value, &value_path, 0, issues),
                None => match schema.get("additionalProperties") {
                    Some(Value::Bool(false)) => {
                        issues.push(ValidationIssue::new(path, format!("unexpected property \"{name}\"")));
                    }
                    Some(sub) => self.eval(sub, value, &value_path, 0, issues),
                    None => {}
                },
            }
        }
    }

    fn eval_array(
        &self,
        schema: &Map<String, Value>,
        items: &[Value],
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                issues.push(ValidationIssue::new(
                    path,
                    format!("expected at least {min} items, found {}", items.len()),
                ));
            }
        }
        if let Some(item_schema) = schema.get("items") {
            for (index, item) in items.iter().enumerate() {
                self.eval(item_schema, item, &index_path(path, index), 0, issues);
            }
        }
    }

    fn eval_string(&self, schema: &Map<String, Value>, text: &str, path: &str, issues: &mut Vec<ValidationIssue>) {
        if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
            if (text.chars().count() as u64) < min {
                issues.push(ValidationIssue::new(
                    path,
                    format!("expected at least {min} characters"),
                ));
            }
        }
        if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
            let matched = self.patterns.get(pattern).map_or(true, |re| re.is_match(text));
            if !matched {
                issues.push(ValidationIssue::new(
                    path,
                    format!("\"{text}\" does not match pattern {pattern}"),
                ));
            }
        }
    }

    fn eval_combinators(
        &self,
        schema: &Map<String, Value>,
        instance: &Value,
        path: &str,
        depth: usize,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(Value::Array(all)) = schema.get("allOf") {
            for sub in all {
                self.eval(sub, instance, path, depth, issues);
            }
        }

        if let Some(Value::Array(any)) = schema.get("anyOf") {
            if !any.iter().any(|sub| self.is_valid_at(sub, instance, path, depth)) {
                issues.push(ValidationIssue::new(path, "does not match any of the allowed schemas"));
            }
        }

        if let Some(Value::Array(one)) = schema.get("oneOf") {
            let matches = one
                .iter()
                .filter(|sub| self.is_valid_at(sub, instance, path, depth))
                .count();
            if matches != 1 {
                issues.push(ValidationIssue::new(
                    path,
                    format!("matches {matches} schemas, expected exactly one"),
                ));
            }
        }

        if let Some(not) = schema.get("not") {
            if self.is_valid_at(not, instance, path, depth) {
                issues.push(ValidationIssue::new(path, "matches a schema it must not match"));
            }
        }

        if let Some(condition) = schema.get("if") {
            let branch = if self.is_valid_at(condition, instance, path, depth) {
                schema.get("then")
            } else {
                schema.get("else")
            };
            if let Some(branch) = branch {
                self.eval(branch, instance, path, depth, issues);
            }
        }
    }

    /// Resolve a local `#/...` pointer.
    fn resolve_ref(&self, reference: &str) -> Option<&Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(&self.root);
        }
        self.root.pointer(pointer)
    }
}

fn eval_number(schema: &Map<String, Value>, n: f64, path: &str, issues: &mut Vec<ValidationIssue>) {
    if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
        if n < min {
            issues.push(ValidationIssue::new(path, format!("{n} is less than the minimum {min}")));
        }
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
        if n > max {
            issues.push(ValidationIssue::new(path, format!("{n} is greater than the maximum {max}")));
        }
    }
}

fn type_matches(expected: &Value, instance: &Value) -> bool {
    match expected {
        Value::String(name) => type_name_matches(name, instance),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| type_name_matches(name, instance)),
        _ => true,
    }
}

fn type_name_matches(name: &str, instance: &Value) -> bool {
    match name {
        "null" => instance.is_null(),
        "boolean" => instance.is_boolean(),
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "number" => instance.is_number(),
        "integer" => {
            instance.is_i64()
                || instance.is_u64()
                || instance.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => true,
    }
}

fn describe_type(expected: &Value) -> String {
    match expected {
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.as_str().unwrap_or("any").to_string(),
    }
}

/// Compile every `pattern` keyword up front so a bad one fails at load.
fn collect_patterns(schema: &Value, patterns: &mut HashMap<String, Regex>) -> Result<()> {
    match schema {
        Value::Object(map) => {
            if let Some(pattern) = map.get("pattern").and_then(Value::as_str) {
                if !patterns.contains_key(pattern) {
                    let regex = Regex::new(pattern).map_err(|e| {
                        ValidationError::InvalidSchema(format!("invalid pattern {pattern}: {e}"))
                    })?;
                    patterns.insert(pattern.to_string(), regex);
                }
            }
            for value in map.values() {
                collect_patterns(value, patterns)?;
            }
        }
        Value::Array(items) => {
            for value in items {
                collect_patterns(value, patterns)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issues(schema: Value, instance: Value) -> Vec<String> {
        JsonSchema::new(schema)
            .unwrap()
            .validate(&instance)
            .into_iter()
            .map(|i| i.to_string())
            .collect()
    }

    #[test]
    fn test_type_and_required() {
        let schema = json!({"type": "object", "required": ["id"]});
        assert_eq!(issues(schema.clone(), json!({})), vec!["/: missing required property \"id\""]);
        assert_eq!(issues(schema, json!([])), vec!["/: expected object, found array"]);
    }

    #[test]
    fn test_type_union_and_integer() {
        let schema = json!({"type": ["number", "string"]});
        assert!(issues(schema.clone(), json!("x")).is_empty());
        assert_eq!(issues(schema, json!(true)), vec!["/: expected number or string, found boolean"]);
        assert!(issues(json!({"type": "integer"}), json!(3)).is_empty());
        assert_eq!(issues(json!({"type": "integer"}), json!(3.5)).len(), 1);
    }

    #[test]
    fn test_properties_and_additional() {
        let schema = json!({
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "additionalProperties": false
        });
        assert_eq!(
            issues(schema, json!({"name": 1, "extra": true})),
            vec![
                "/name: expected string, found number",
                "/: unexpected property \"extra\"",
            ]
        );

        let typed = json!({"additionalProperties": {"type": "string"}});
        assert_eq!(issues(typed, json!({"a": "x", "b": 2})), vec!["/b: expected string, found number"]);
    }

    #[test]
    fn test_items_and_min_items() {
        let schema = json!({"type": "array", "minItems": 2, "items": {"type": "number"}});
        assert_eq!(
            issues(schema, json!(["a"])),
            vec!["/: expected at least 2 items, found 1", "/0: expected number, found string"]
        );
    }

    #[test]
    fn test_enum_and_const() {
        assert_eq!(
            issues(json!({"enum": ["a", "b"]}), json!("c")),
            vec!["/: \"c\" is not one of \"a\", \"b\""]
        );
        assert_eq!(issues(json!({"const": 1}), json!(2)), vec!["/: expected 1, found 2"]);
    }

    #[test]
    fn test_string_keywords() {
        let schema = json!({"type": "string", "minLength": 2, "pattern": "^/"});
        assert_eq!(
            issues(schema, json!("x")),
            vec!["/: expected at least 2 characters", "/: \"x\" does not match pattern ^/"]
        );
    }

    #[test]
    fn test_number_bounds() {
        let schema = json!({"minimum": 1, "maximum": 6});
        assert!(issues(schema.clone(), json!(3)).is_empty());
        assert_eq!(issues(schema.clone(), json!(0)), vec!["/: 0 is less than the minimum 1"]);
        assert_eq!(issues(schema, json!(7)), vec!["/: 7 is greater than the maximum 6"]);
    }

    #[test]
    fn test_local_ref() {
        let schema = json!({
            "$defs": {"name": {"type": "string"}},
            "properties": {"first": {"$ref": "#/$defs/name"}}
        });
        assert_eq!(issues(schema, json!({"first": 1})), vec!["/first: expected string, found number"]);
    }

    #[test]
    fn test_recursive_ref() {
        let schema = json!({
            "type": "object",
            "required": ["id"],
            "properties": {"children": {"type": "array", "items": {"$ref": "#"}}}
        });
        let instance = json!({"id": "a", "children": [{"id": "b"}, {"children": []}]});
        assert_eq!(issues(schema, instance), vec!["/children/1: missing required property \"id\""]);
    }

    #[test]
    fn test_ref_depth_restarts_per_level() {
        let schema = json!({
            "type": "object",
            "properties": {"children": {"type": "array", "items": {"$ref": "#"}}}
        });
        let mut instance = json!({"children": []});
        for _ in 0..(MAX_REF_DEPTH + 20) {
            instance = json!({"children": [instance]});
        }
        assert!(issues(schema, instance).is_empty());
    }

    #[test]
    fn test_ref_loop_without_descent_is_caught() {
        let schema = json!({"$defs": {"a": {"$ref": "#/$defs/b"}, "b": {"$ref": "#/$defs/a"}}, "$ref": "#/$defs/a"});
        assert_eq!(issues(schema, json!(1)), vec!["/: schema reference depth exceeded"]);
    }

    #[test]
    fn test_combinators() {
        let any = json!({"anyOf": [{"type": "string"}, {"type": "number"}]});
        assert!(issues(any.clone(), json!(1)).is_empty());
        assert_eq!(issues(any, json!(null)), vec!["/: does not match any of the allowed schemas"]);

        let one = json!({"oneOf": [{"minimum": 0}, {"maximum": 10}]});
        assert_eq!(issues(one, json!(5)), vec!["/: matches 2 schemas, expected exactly one"]);

        let not = json!({"not": {"const": "forbidden"}});
        assert_eq!(issues(not, json!("forbidden")), vec!["/: matches a schema it must not match"]);
    }

    #[test]
    fn test_if_then_else() {
        let schema = json!({
            "if": {"properties": {"kind": {"const": "link"}}},
            "then": {"required": ["href"]},
            "else": {"required": ["text"]}
        });
        assert_eq!(issues(schema.clone(), json!({"kind": "link"})), vec!["/: missing required property \"href\""]);
        assert_eq!(issues(schema, json!({"kind": "label"})), vec!["/: missing required property \"text\""]);
    }

    #[test]
    fn test_false_schema_and_unresolved_ref() {
        assert_eq!(issues(json!({"properties": {"x": false}}), json!({"x": 1})), vec!["/x: no value is allowed here"]);
        assert_eq!(
            issues(json!({"$ref": "#/$defs/missing"}), json!(1)),
            vec!["/: unresolvable schema reference #/$defs/missing"]
        );
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let err = JsonSchema::new(json!({"pattern": "("})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSchema(_)));
    }

    #[test]
    fn test_non_object_root_is_fatal() {
        assert!(JsonSchema::new(json!([1, 2])).is_err());
    }

    #[test]
    fn test_bundled_schema_loads() {
        let schema = JsonSchema::bundled().unwrap();
        assert!(schema.root().pointer("/$defs/props/Button").is_some());
    }
}
