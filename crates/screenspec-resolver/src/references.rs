//! Component reference expansion.
//!
//! Expands ComponentRef nodes by:
//! 1. Looking up the component definition
//! 2. Merging root prop and style overrides
//! 3. Merging per-descendant overrides by original node id
//! 4. Substituting caller-supplied slot content
//!
//! The expanded root takes over the ComponentRef's id, then is resolved
//! again since definitions may reference other definitions. Misses and
//! cycles fail closed: the ComponentRef is kept with a diagnostic prop and
//! rendered as a placeholder downstream.

use std::borrow::Cow;

use screenspec_core::{ComponentRefProps, Node, DIAGNOSTIC_PROP};
use serde_json::Value;

use crate::ComponentRegistry;

/// Maximum nesting depth for component expansion.
pub const MAX_EXPANSION_DEPTH: usize = 64;

/// Expand every ComponentRef in a tree.
pub fn resolve_references(tree: &Node, registry: &ComponentRegistry) -> Node {
    ReferenceResolver::new(registry).resolve(tree).into_owned()
}

/// Component expander state for one resolution call.
pub struct ReferenceResolver<'a> {
    registry: &'a ComponentRegistry,
    /// Definition ids being expanded, outermost first.
    expansion_stack: Vec<String>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            registry,
            expansion_stack: Vec::new(),
        }
    }

    /// Resolve a subtree.
    ///
    /// Subtrees without any ComponentRef come back borrowed.
    pub fn resolve<'n>(&mut self, node: &'n Node) -> Cow<'n, Node> {
        if node.props.contains_key(DIAGNOSTIC_PROP) && node.is_component_ref() {
            // Already failed once; keep the original diagnostic.
            return Cow::Borrowed(node);
        }

        if let Some(decoded) = node.component_ref() {
            let expanded = match decoded {
                Ok(props) => self.expand(node, &props),
                Err(e) => with_diagnostic(node, format!("invalid ComponentRef props: {e}")),
            };
            return Cow::Owned(expanded);
        }

        let mut rebuilt: Option<Vec<Node>> = None;
        for (index, child) in node.children.iter().enumerate() {
            match self.resolve(child) {
                Cow::Borrowed(_) => {
                    if let Some(children) = rebuilt.as_mut() {
                        children.push(child.clone());
                    }
                }
                Cow::Owned(resolved) => {
                    rebuilt
                        .get_or_insert_with(|| node.children[..index].to_vec())
                        .push(resolved);
                }
            }
        }

        match rebuilt {
            None => Cow::Borrowed(node),
            Some(children) => Cow::Owned(Node {
                id: node.id.clone(),
                kind: node.kind.clone(),
                props: node.props.clone(),
                children,
                style: node.style.clone(),
                responsive: node.responsive.clone(),
                interactions: node.interactions.clone(),
                data_source: node.data_source.clone(),
            }),
        }
    }

    fn expand(&mut self, node: &Node, props: &ComponentRefProps) -> Node {
        let target = props.target.as_str();

        if self.expansion_stack.iter().any(|id| id == target) {
            let mut cycle = self.expansion_stack.clone();
            cycle.push(target.to_string());
            let cycle = cycle.join(" -> ");
            tracing::warn!(node = %node.id, %cycle, "circular component reference");
            return with_diagnostic(node, format!("circular reference: {cycle}"));
        }

        if self.expansion_stack.len() >= MAX_EXPANSION_DEPTH {
            tracing::warn!(node = %node.id, "component nesting too deep");
            return with_diagnostic(
                node,
                format!("maximum component nesting depth ({MAX_EXPANSION_DEPTH}) exceeded"),
            );
        }

        let Some(definition) = self.registry.get(target) else {
            tracing::debug!(node = %node.id, target, "unresolved component reference");
            return with_diagnostic(node, format!("unresolved component reference: {target}"));
        };

        // Slot content belongs to the caller, so it is resolved in the
        // caller's context before being spliced in.
        let slot_content: Vec<(&str, Vec<Node>)> = props
            .slot_content
            .iter()
            .map(|(slot, nodes)| {
                let resolved = nodes.iter().map(|n| self.resolve(n).into_owned()).collect();
                (slot.as_str(), resolved)
            })
            .collect();

        let mut instance = definition.tree.clone();
        instance.merge_props(&props.overrides);
        instance.style.merge(&props.style_overrides);

        instance.for_each_mut(&mut |n| {
            if let Some(patch) = props.descendants.get(&n.id) {
                n.merge_props(&patch.props);
                n.style.merge(&patch.style);
            }
        });

        instance.for_each_mut(&mut |n| {
            let Some(slot) = n.slot_name().map(str::to_string) else {
                return;
            };
            if let Some((_, content)) = slot_content.iter().find(|(name, _)| *name == slot) {
                n.children = content.clone();
            }
        });

        instance.id = node.id.clone();

        self.expansion_stack.push(target.to_string());
        let resolved = self.resolve(&instance).into_owned();
        self.expansion_stack.pop();
        resolved
    }
}

fn with_diagnostic(node: &Node, message: String) -> Node {
    let mut placeholder = node.clone();
    placeholder
        .props
        .insert(DIAGNOSTIC_PROP.to_string(), Value::String(message));
    placeholder
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenspec_core::{ComponentDef, NodeKind, Style, StyleProperty, StyleValue};
    use serde_json::json;

    fn component_ref(id: &str, target: &str) -> Node {
        Node::new(id, NodeKind::ComponentRef).with_prop("ref", target)
    }

    fn text_def(id: &str, text: &str) -> ComponentDef {
        ComponentDef::new(
            id,
            "Label",
            Node::new("x", NodeKind::Text).with_prop("text", text),
        )
    }

    #[test]
    fn test_root_override_wins() {
        let registry = ComponentRegistry::new().with(text_def("comp_1", "hi"));
        let tree = component_ref("ref_1", "comp_1").with_prop("overrides", json!({"text": "bye"}));

        let resolved = resolve_references(&tree, &registry);
        assert_eq!(resolved.id, "ref_1");
        assert_eq!(resolved.kind, NodeKind::Text);
        assert_eq!(resolved.prop_str("text"), Some("bye"));
    }

    #[test]
    fn test_missing_definition_passes_through() {
        let registry = ComponentRegistry::new();
        let tree = Node::new("root", NodeKind::Stack).with_child(component_ref("r", "gone"));

        let resolved = resolve_references(&tree, &registry);
        let placeholder = &resolved.children[0];
        assert_eq!(placeholder.kind, NodeKind::ComponentRef);
        assert_eq!(placeholder.prop_str("ref"), Some("gone"));
        assert!(placeholder.prop_str(DIAGNOSTIC_PROP).unwrap().contains("gone"));
    }

    #[test]
    fn test_style_and_descendant_overrides() {
        let def = ComponentDef::new(
            "card",
            "Card",
            Node::new("card_root", NodeKind::Card)
                .with_style(Style::new().with(StyleProperty::Padding, 8.0))
                .with_child(Node::new("card_title", NodeKind::Heading).with_prop("text", "Title"))
                .with_child(Node::new("card_body", NodeKind::Text).with_prop("text", "Body")),
        );
        let registry = ComponentRegistry::new().with(def);
        let tree = component_ref("promo", "card")
            .with_prop("styleOverrides", json!({"padding": 24}))
            .with_prop(
                "descendants",
                json!({"card_title": {"props": {"text": "Sale"}, "style": {"color": "#f00"}}}),
            );

        let resolved = resolve_references(&tree, &registry);
        assert_eq!(resolved.id, "promo");
        assert_eq!(resolved.style.get(StyleProperty::Padding), Some(&StyleValue::Number(24.0)));
        let title = resolved.find("card_title").unwrap();
        assert_eq!(title.prop_str("text"), Some("Sale"));
        assert_eq!(title.style.get(StyleProperty::Color), Some(&StyleValue::from("#f00")));
        assert_eq!(resolved.find("card_body").unwrap().prop_str("text"), Some("Body"));
    }

    #[test]
    fn test_slot_substitution() {
        let def = ComponentDef::new(
            "layout",
            "Layout",
            Node::new("shell", NodeKind::Container).with_child(
                Node::new("content", NodeKind::Stack)
                    .with_prop("slot", "main")
                    .with_child(Node::new("fallback", NodeKind::Text)),
            ),
        );
        let registry = ComponentRegistry::new().with(def);
        let tree = component_ref("page", "layout").with_prop(
            "slotContent",
            json!({"main": [{"id": "hello", "type": "Text", "props": {"text": "Hello"}}]}),
        );

        let resolved = resolve_references(&tree, &registry);
        let content = resolved.find("content").unwrap();
        assert_eq!(content.children.len(), 1);
        assert_eq!(content.children[0].id, "hello");
        assert!(resolved.find("fallback").is_none());
    }

    #[test]
    fn test_nested_definitions() {
        let inner = text_def("inner", "inner text");
        let outer = ComponentDef::new(
            "outer",
            "Outer",
            Node::new("outer_root", NodeKind::Stack).with_child(component_ref("slot_inner", "inner")),
        );
        let registry = ComponentRegistry::new().with(inner).with(outer);

        let resolved = resolve_references(&component_ref("o", "outer"), &registry);
        assert_eq!(resolved.kind, NodeKind::Stack);
        assert_eq!(resolved.children[0].id, "slot_inner");
        assert_eq!(resolved.children[0].prop_str("text"), Some("inner text"));
    }

    #[test]
    fn test_cycle_fails_closed() {
        let a = ComponentDef::new(
            "a",
            "A",
            Node::new("a_root", NodeKind::Stack).with_child(component_ref("to_b", "b")),
        );
        let b = ComponentDef::new(
            "b",
            "B",
            Node::new("b_root", NodeKind::Stack).with_child(component_ref("to_a", "a")),
        );
        let registry = ComponentRegistry::new().with(a).with(b);

        let resolved = resolve_references(&component_ref("start", "a"), &registry);
        let placeholder = resolved.find("to_a").unwrap();
        assert_eq!(placeholder.kind, NodeKind::ComponentRef);
        assert_eq!(
            placeholder.prop_str(DIAGNOSTIC_PROP),
            Some("circular reference: a -> b -> a")
        );
    }

    #[test]
    fn test_self_slot_content_is_not_a_cycle() {
        let def = ComponentDef::new(
            "box",
            "Box",
            Node::new("box_root", NodeKind::Container).with_prop("slot", "inner"),
        );
        let registry = ComponentRegistry::new().with(def);
        let tree = component_ref("outer", "box").with_prop(
            "slotContent",
            json!({"inner": [{"id": "nested", "type": "ComponentRef", "props": {"ref": "box"}}]}),
        );

        let resolved = resolve_references(&tree, &registry);
        let nested = resolved.find("nested").unwrap();
        assert_eq!(nested.kind, NodeKind::Container);
        assert!(nested.props.get(DIAGNOSTIC_PROP).is_none());
    }

    #[test]
    fn test_ref_free_tree_is_borrowed() {
        let registry = ComponentRegistry::new();
        let tree = Node::new("root", NodeKind::Stack).with_child(Node::new("t", NodeKind::Text));
        let mut resolver = ReferenceResolver::new(&registry);
        assert!(matches!(resolver.resolve(&tree), Cow::Borrowed(_)));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let registry = ComponentRegistry::new().with(text_def("comp_1", "hi"));
        let tree = Node::new("root", NodeKind::Stack)
            .with_child(component_ref("r1", "comp_1"))
            .with_child(Node::new("plain", NodeKind::Divider));

        let first = resolve_references(&tree, &registry);
        let second = resolve_references(&tree, &registry);
        assert_eq!(first, second);
        assert_eq!(first.collect_ids(), vec!["root", "r1", "plain"]);
    }
}
