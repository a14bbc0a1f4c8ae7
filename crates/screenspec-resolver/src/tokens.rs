//! Token resolution.
//!
//! Resolves token references (`$token.path`) in style values to their actual
//! values. A miss never fails: single values keep their literal reference
//! text, whole style bags omit the unresolved property.

use screenspec_core::{
    DesignTokens, Node, Responsive, Style, StyleValue, TOKEN_SEPARATOR,
};
use serde_json::Value;
use smallvec::SmallVec;

/// Resolve one style value. `None` means unresolved.
///
/// Literals resolve to themselves.
pub fn resolve_token(value: &StyleValue, tokens: Option<&DesignTokens>) -> Option<StyleValue> {
    TokenResolver::new(tokens).resolve(value)
}

/// Resolve one style value, keeping the literal text on a miss.
pub fn resolve_value_or_literal(value: &StyleValue, tokens: Option<&DesignTokens>) -> StyleValue {
    TokenResolver::new(tokens).resolve_or_literal(value)
}

/// Resolve every property of a style bag, omitting unresolved ones.
pub fn resolve_style(style: &Style, tokens: Option<&DesignTokens>) -> Style {
    TokenResolver::new(tokens).resolve_style(style)
}

/// Resolve the style and responsive bags of every node in a tree.
pub fn resolve_tree_tokens(node: &Node, tokens: Option<&DesignTokens>) -> Node {
    let mut resolver = TokenResolver::new(tokens);
    let mut resolved = node.clone();
    resolved.for_each_mut(&mut |n| {
        n.style = resolver.resolve_style(&n.style);
        n.responsive = Responsive {
            tablet: resolver.resolve_style(&n.responsive.tablet),
            mobile: resolver.resolve_style(&n.responsive.mobile),
        };
    });
    resolved
}

/// Token resolver state.
pub struct TokenResolver<'a> {
    tokens: Option<&'a DesignTokens>,
    /// Track the current resolution path for circular alias detection.
    resolution_stack: Vec<String>,
}

impl<'a> TokenResolver<'a> {
    pub fn new(tokens: Option<&'a DesignTokens>) -> Self {
        Self {
            tokens,
            resolution_stack: Vec::new(),
        }
    }

    /// Resolve one value. `None` means unresolved.
    pub fn resolve(&mut self, value: &StyleValue) -> Option<StyleValue> {
        let Some(path) = value.as_token_ref() else {
            return Some(value.clone());
        };
        let tokens = self.tokens?;

        // An alias chain that loops back on itself never resolves.
        if self.resolution_stack.iter().any(|p| p == path) {
            tracing::trace!(path, "circular token alias");
            return None;
        }

        let segments: SmallVec<[&str; 4]> = path.split(TOKEN_SEPARATOR).collect();
        let terminal = match tokens.lookup(segments.iter().copied())? {
            Value::Object(leaf) => leaf.get("value")?,
            primitive => primitive,
        };
        let resolved = StyleValue::from_json(terminal)?;

        // Token values may themselves alias other tokens.
        if resolved.is_token_ref() {
            self.resolution_stack.push(path.to_string());
            let result = self.resolve(&resolved);
            self.resolution_stack.pop();
            return result;
        }
        Some(resolved)
    }

    /// Resolve one value, keeping the literal text on a miss.
    pub fn resolve_or_literal(&mut self, value: &StyleValue) -> StyleValue {
        self.resolve(value).unwrap_or_else(|| {
            tracing::trace!(value = %value, "token unresolved, keeping literal");
            value.clone()
        })
    }

    /// Resolve a style bag, dropping properties that do not resolve.
    pub fn resolve_style(&mut self, style: &Style) -> Style {
        style
            .iter()
            .filter_map(|(property, value)| self.resolve(value).map(|v| (property, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use screenspec_core::{NodeKind, StyleProperty};
    use serde_json::json;

    fn tokens() -> DesignTokens {
        DesignTokens::from_value(json!({
            "color": {
                "primary": {"value": "#3366ff", "type": "color"},
                "brand": {"value": "$color.primary", "type": "color"},
                "loop": {"value": "$color.loop", "type": "color"},
                "group": {"shade": {"value": "#000", "type": "color"}}
            },
            "spacing": {"md": {"value": 16, "type": "dimension"}},
            "opacity": {"muted": 0.5}
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_color_token() {
        let tokens = tokens();
        let value = StyleValue::from("$color.primary");
        assert_eq!(resolve_token(&value, Some(&tokens)), Some(StyleValue::from("#3366ff")));
    }

    #[test]
    fn test_empty_table_keeps_literal() {
        let empty = DesignTokens::new();
        let value = StyleValue::from("$color.primary");
        assert_eq!(resolve_value_or_literal(&value, Some(&empty)), value);
        assert_eq!(resolve_value_or_literal(&value, None), value);
    }

    #[test]
    fn test_primitive_terminal() {
        let tokens = tokens();
        let value = StyleValue::from("$opacity.muted");
        assert_eq!(resolve_token(&value, Some(&tokens)), Some(StyleValue::Number(0.5)));
    }

    #[test]
    fn test_group_is_unresolved() {
        let tokens = tokens();
        assert_eq!(resolve_token(&StyleValue::from("$color.group"), Some(&tokens)), None);
    }

    #[test]
    fn test_alias_chain() {
        let tokens = tokens();
        let value = StyleValue::from("$color.brand");
        assert_eq!(resolve_token(&value, Some(&tokens)), Some(StyleValue::from("#3366ff")));
    }

    #[test]
    fn test_circular_alias_is_unresolved() {
        let tokens = tokens();
        assert_eq!(resolve_token(&StyleValue::from("$color.loop"), Some(&tokens)), None);
    }

    #[test]
    fn test_literals_pass_through() {
        let value = StyleValue::Number(12.0);
        assert_eq!(resolve_token(&value, None), Some(value));
    }

    #[test]
    fn test_style_bag_omits_unresolved() {
        let tokens = tokens();
        let style = Style::new()
            .with(StyleProperty::Padding, "$spacing.md")
            .with(StyleProperty::Color, "$color.missing")
            .with(StyleProperty::BorderRadius, 4.0);

        let resolved = resolve_style(&style, Some(&tokens));
        assert_eq!(resolved.get(StyleProperty::Padding), Some(&StyleValue::Number(16.0)));
        assert_eq!(resolved.get(StyleProperty::Color), None);
        assert_eq!(resolved.get(StyleProperty::BorderRadius), Some(&StyleValue::Number(4.0)));
    }

    #[test]
    fn test_resolve_tree_tokens() {
        let tokens = tokens();
        let mut child = Node::new("c", NodeKind::Text);
        child.responsive.mobile = Style::new().with(StyleProperty::Color, "$color.primary");
        let tree = Node::new("root", NodeKind::Stack)
            .with_style(Style::new().with(StyleProperty::Gap, "$spacing.md"))
            .with_child(child);

        let resolved = resolve_tree_tokens(&tree, Some(&tokens));
        assert_eq!(resolved.style.get(StyleProperty::Gap), Some(&StyleValue::Number(16.0)));
        assert_eq!(
            resolved.children[0].responsive.mobile.get(StyleProperty::Color),
            Some(&StyleValue::from("#3366ff"))
        );
    }

    proptest! {
        #[test]
        fn test_literal_bags_are_unchanged(values in prop::collection::vec(-1000.0f64..1000.0, 1..8)) {
            let style: Style = StyleProperty::ALL
                .iter()
                .copied()
                .zip(values.iter().map(|v| StyleValue::Number(*v)))
                .collect();
            prop_assert_eq!(resolve_style(&style, None), style);
        }
    }
}
