//! Validation for screenspec documents.
//!
//! Two interchangeable paths:
//! - [`Validator::Schema`] evaluates a JSON schema document (one ships with
//!   this crate, see [`Validator::bundled`])
//! - [`Validator::Fallback`] applies hand-written rules when no schema is
//!   available
//!
//! Both report duplicate node ids. Validation never mutates its input and
//! collects every issue into one [`ValidationReport`] per screen.

pub mod builtins;
mod error;
mod fallback;
mod report;
mod schema;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use screenspec_core::ScreenSpec;
use serde_json::Value;

pub use error::{Result, ValidationError};
pub use fallback::validate_fallback;
pub use report::{ValidationIssue, ValidationReport};
pub use schema::{JsonSchema, BUNDLED_SCHEMA};

use report::{child_path, index_path};

/// A reusable screen validator.
#[derive(Debug, Clone, Default)]
pub enum Validator {
    /// Validate against a schema document.
    Schema(JsonSchema),
    /// Validate with the built-in rules.
    #[default]
    Fallback,
}

impl Validator {
    /// A validator using the schema shipped with this crate.
    pub fn bundled() -> Result<Self> {
        Ok(Self::Schema(JsonSchema::bundled()?))
    }

    pub fn from_schema(schema: Value) -> Result<Self> {
        Ok(Self::Schema(JsonSchema::new(schema)?))
    }

    /// Load a schema file.
    ///
    /// A missing file selects the fallback rules. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "schema not found, using built-in rules");
            return Ok(Self::Fallback);
        }
        let text = fs::read_to_string(path).map_err(|e| ValidationError::io(path, e))?;
        let schema = JsonSchema::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded schema");
        Ok(Self::Schema(schema))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Validate a raw screen document.
    pub fn validate(&self, instance: &Value) -> ValidationReport {
        let mut report: ValidationReport = match self {
            Self::Schema(schema) => schema.validate(instance).into_iter().collect(),
            Self::Fallback => validate_fallback(instance).into_iter().collect(),
        };
        report.extend(duplicate_id_issues(instance));
        report
    }

    /// Validate an already deserialized screen.
    pub fn validate_spec(&self, spec: &ScreenSpec) -> Result<ValidationReport> {
        Ok(self.validate(&serde_json::to_value(spec)?))
    }
}

/// Report every node id used more than once in `tree`.
fn duplicate_id_issues(instance: &Value) -> Vec<ValidationIssue> {
    let Some(tree) = instance.get("tree") else {
        return Vec::new();
    };

    let mut first_seen: HashMap<&str, String> = HashMap::new();
    let mut issues = Vec::new();
    let mut stack = vec![(tree, "/tree".to_string())];

    while let Some((node, path)) = stack.pop() {
        if let Some(id) = node.get("id").and_then(Value::as_str) {
            match first_seen.get(id) {
                Some(first) => issues.push(ValidationIssue::new(
                    child_path(&path, "id"),
                    format!("duplicate node id \"{id}\" (first used at {first})"),
                )),
                None => {
                    first_seen.insert(id, path.clone());
                }
            }
        }
        if let Some(children) = node.get("children").and_then(Value::as_array) {
            let children_path = child_path(&path, "children");
            for (index, child) in children.iter().enumerate().rev() {
                stack.push((child, index_path(&children_path, index)));
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn valid_screen() -> Value {
        json!({
            "version": 1,
            "route": "/profile",
            "tree": {
                "id": "root",
                "type": "Stack",
                "children": [
                    {"id": "name", "type": "Text", "props": {"text": "Ada"}},
                    {"id": "edit", "type": "Button", "props": {"label": "Edit"}}
                ]
            }
        })
    }

    fn invalid_screens() -> Vec<Value> {
        let mut bad_version = valid_screen();
        bad_version["version"] = json!(3);
        let mut bad_route = valid_screen();
        bad_route["route"] = json!("profile page");
        let mut unknown_prop = valid_screen();
        unknown_prop["tree"]["children"][0]["props"]["href"] = json!("/x");
        let mut missing_required = valid_screen();
        missing_required["tree"]["children"][1]["props"] = json!({});
        let mut bad_enum = valid_screen();
        bad_enum["tree"]["children"][1]["props"]["variant"] = json!("huge");
        let mut bad_style = valid_screen();
        bad_style["tree"]["style"] = json!({"glow": 2});
        vec![bad_version, bad_route, unknown_prop, missing_required, bad_enum, bad_style]
    }

    #[test]
    fn test_both_paths_accept_valid_screen() {
        let screen = valid_screen();
        assert!(Validator::Fallback.validate(&screen).is_valid());
        let report = Validator::bundled().unwrap().validate(&screen);
        assert!(report.is_valid(), "{report}");
    }

    #[test]
    fn test_both_paths_reject_invalid_screens() {
        let schema = Validator::bundled().unwrap();
        for screen in invalid_screens() {
            assert!(!Validator::Fallback.validate(&screen).is_valid(), "fallback accepted {screen}");
            assert!(!schema.validate(&screen).is_valid(), "schema accepted {screen}");
        }
    }

    #[test]
    fn test_both_paths_accept_deep_tree() {
        let mut node = json!({"id": "leaf", "type": "Text", "props": {"text": "bottom"}});
        for level in 0..140 {
            node = json!({"id": format!("stack-{level}"), "type": "Stack", "children": [node]});
        }
        let screen = json!({"version": 1, "route": "/deep", "tree": node});

        assert!(Validator::Fallback.validate(&screen).is_valid());
        let report = Validator::bundled().unwrap().validate(&screen);
        assert!(report.is_valid(), "{report}");
    }

    #[test]
    fn test_other_types_skip_prop_checks() {
        let mut screen = valid_screen();
        screen["tree"]["children"][0] = json!({"id": "chart", "type": "RevenueChart", "props": {"series": [1]}});
        assert!(Validator::Fallback.validate(&screen).is_valid());
        assert!(Validator::bundled().unwrap().validate(&screen).is_valid());
    }

    #[test]
    fn test_duplicate_ids_reported() {
        let mut screen = valid_screen();
        screen["tree"]["children"][1]["id"] = json!("name");

        for validator in [Validator::Fallback, Validator::bundled().unwrap()] {
            let report = validator.validate(&screen);
            assert_eq!(report.len(), 1, "{report}");
            assert_eq!(report.issues()[0].path, "/tree/children/1/id");
            assert_eq!(
                report.issues()[0].message,
                "duplicate node id \"name\" (first used at /tree/children/0)"
            );
        }
    }

    #[test]
    fn test_validate_spec() {
        let spec = ScreenSpec::from_value(valid_screen()).unwrap();
        assert!(Validator::bundled().unwrap().validate_spec(&spec).unwrap().is_valid());
    }

    #[test]
    fn test_load_missing_schema_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let validator = Validator::load(&dir.path().join("absent.json")).unwrap();
        assert!(!validator.is_schema());
    }

    #[test]
    fn test_load_schema_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLED_SCHEMA.as_bytes()).unwrap();
        let validator = Validator::load(file.path()).unwrap();
        assert!(validator.is_schema());
    }

    #[test]
    fn test_load_unparsable_schema_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(matches!(Validator::load(file.path()), Err(ValidationError::Json(_))));
    }
}
