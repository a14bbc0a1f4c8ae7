//! Allowed props per built-in node type.
//!
//! Unknown props on a built-in type are errors. Externally supplied types
//! (`NodeKind::Other`) have no table and are not prop-checked.

use screenspec_core::NodeKind;
use serde_json::Value;

/// JSON type of a prop value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// One allowed prop.
#[derive(Debug, Clone, Copy)]
pub struct PropSpec {
    pub name: &'static str,
    pub ty: PropType,
    pub required: bool,
    /// Allowed string values. Empty means any.
    pub values: &'static [&'static str],
}

impl PropSpec {
    const fn required(name: &'static str, ty: PropType) -> Self {
        Self {
            name,
            ty,
            required: true,
            values: &[],
        }
    }

    const fn optional(name: &'static str, ty: PropType) -> Self {
        Self {
            name,
            ty,
            required: false,
            values: &[],
        }
    }

    const fn one_of(self, values: &'static [&'static str]) -> Self {
        Self { values, ..self }
    }
}

const CONTAINER: &[PropSpec] = &[
    PropSpec::optional("as", PropType::String).one_of(&["div", "section", "main", "header", "footer", "nav", "aside"]),
];

const STACK: &[PropSpec] = &[
    PropSpec::optional("direction", PropType::String).one_of(&["row", "column"]),
    PropSpec::optional("wrap", PropType::Boolean),
];

const GRID: &[PropSpec] = &[
    PropSpec::optional("columns", PropType::Number),
    PropSpec::optional("rows", PropType::Number),
];

const CARD: &[PropSpec] = &[
    PropSpec::optional("title", PropType::String),
    PropSpec::optional("elevated", PropType::Boolean),
];

const TEXT: &[PropSpec] = &[
    PropSpec::required("text", PropType::String),
    PropSpec::optional("variant", PropType::String).one_of(&["body", "caption", "label", "muted"]),
];

const HEADING: &[PropSpec] = &[
    PropSpec::required("text", PropType::String),
    PropSpec::optional("level", PropType::Number),
];

const BUTTON: &[PropSpec] = &[
    PropSpec::required("label", PropType::String),
    PropSpec::optional("variant", PropType::String).one_of(&["primary", "secondary", "outline", "ghost", "destructive"]),
    PropSpec::optional("disabled", PropType::Boolean),
    PropSpec::optional("type", PropType::String).one_of(&["button", "submit", "reset"]),
];

const LINK: &[PropSpec] = &[
    PropSpec::required("text", PropType::String),
    PropSpec::required("href", PropType::String),
    PropSpec::optional("external", PropType::Boolean),
];

const IMAGE: &[PropSpec] = &[
    PropSpec::required("src", PropType::String),
    PropSpec::optional("alt", PropType::String),
    PropSpec::optional("fit", PropType::String).one_of(&["cover", "contain", "fill"]),
];

const INPUT: &[PropSpec] = &[
    PropSpec::optional("name", PropType::String),
    PropSpec::optional("label", PropType::String),
    PropSpec::optional("placeholder", PropType::String),
    PropSpec::optional("inputType", PropType::String).one_of(&["text", "email", "password", "number", "tel", "url", "search", "date"]),
    PropSpec::optional("defaultValue", PropType::String),
    PropSpec::optional("required", PropType::Boolean),
    PropSpec::optional("disabled", PropType::Boolean),
];

const TEXTAREA: &[PropSpec] = &[
    PropSpec::optional("name", PropType::String),
    PropSpec::optional("label", PropType::String),
    PropSpec::optional("placeholder", PropType::String),
    PropSpec::optional("rows", PropType::Number),
    PropSpec::optional("required", PropType::Boolean),
];

const SELECT: &[PropSpec] = &[
    PropSpec::optional("name", PropType::String),
    PropSpec::optional("label", PropType::String),
    PropSpec::required("options", PropType::Array),
    PropSpec::optional("placeholder", PropType::String),
    PropSpec::optional("required", PropType::Boolean),
];

const CHECKBOX: &[PropSpec] = &[
    PropSpec::optional("name", PropType::String),
    PropSpec::required("label", PropType::String),
    PropSpec::optional("checked", PropType::Boolean),
];

const DIVIDER: &[PropSpec] = &[
    PropSpec::optional("orientation", PropType::String).one_of(&["horizontal", "vertical"]),
];

const SPACER: &[PropSpec] = &[
    PropSpec::optional("size", PropType::Number),
];

const LIST: &[PropSpec] = &[
    PropSpec::optional("items", PropType::Array),
    PropSpec::optional("ordered", PropType::Boolean),
    PropSpec::optional("emptyText", PropType::String),
];

const FORM: &[PropSpec] = &[
    PropSpec::optional("submitLabel", PropType::String),
    PropSpec::optional("action", PropType::String),
    PropSpec::optional("method", PropType::String).one_of(&["get", "post"]),
];

const COMPONENT_REF: &[PropSpec] = &[
    PropSpec::required("ref", PropType::String),
    PropSpec::optional("overrides", PropType::Object),
    PropSpec::optional("styleOverrides", PropType::Object),
    PropSpec::optional("descendants", PropType::Object),
    PropSpec::optional("slotContent", PropType::Object),
    PropSpec::optional("diagnostic", PropType::String),
];

const COMMON: &[PropSpec] = &[
    PropSpec::optional("slot", PropType::String),
    PropSpec::optional("testId", PropType::String),
    PropSpec::optional("ariaLabel", PropType::String),
];

/// The type-specific prop table for a built-in kind.
pub fn props_for(kind: &NodeKind) -> Option<&'static [PropSpec]> {
    let table = match kind {
        NodeKind::Container => CONTAINER,
        NodeKind::Stack => STACK,
        NodeKind::Grid => GRID,
        NodeKind::Card => CARD,
        NodeKind::Text => TEXT,
        NodeKind::Heading => HEADING,
        NodeKind::Button => BUTTON,
        NodeKind::Link => LINK,
        NodeKind::Image => IMAGE,
        NodeKind::Input => INPUT,
        NodeKind::Textarea => TEXTAREA,
        NodeKind::Select => SELECT,
        NodeKind::Checkbox => CHECKBOX,
        NodeKind::Divider => DIVIDER,
        NodeKind::Spacer => SPACER,
        NodeKind::List => LIST,
        NodeKind::Form => FORM,
        NodeKind::ComponentRef => COMPONENT_REF,
        NodeKind::Other(_) => return None,
    };
    Some(table)
}

/// Props every built-in kind accepts.
pub fn common_props() -> &'static [PropSpec] {
    COMMON
}

/// Find the spec for `name` on `kind`, including common props.
pub fn lookup(kind: &NodeKind, name: &str) -> Option<&'static PropSpec> {
    props_for(kind)?
        .iter()
        .chain(COMMON)
        .find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_builtin_has_a_table() {
        for kind in NodeKind::BUILTINS.iter() {
            assert!(props_for(kind).is_some(), "{kind} has no prop table");
        }
        assert!(props_for(&NodeKind::Other("Chart".into())).is_none());
    }

    #[test]
    fn test_lookup_includes_common_props() {
        assert!(lookup(&NodeKind::Text, "text").is_some_and(|s| s.required));
        assert!(lookup(&NodeKind::Text, "slot").is_some());
        assert!(lookup(&NodeKind::Text, "href").is_none());
        assert!(lookup(&NodeKind::Other("Chart".into()), "slot").is_none());
    }

    #[test]
    fn test_prop_type_matches() {
        assert!(PropType::Number.matches(&json!(3)));
        assert!(!PropType::Number.matches(&json!("3")));
        assert!(PropType::Array.matches(&json!([])));
    }
}
