//! Node id allocation.

use std::collections::HashSet;

use screenspec_core::{Node, NodeKind};
use uuid::Uuid;

/// Allocate an id for a node of `kind` that is not in `taken`.
///
/// Ids look like `button_1f3a9c2e`.
pub fn fresh_id(kind: &NodeKind, taken: &HashSet<String>) -> String {
    let prefix: String = kind
        .as_str()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    let prefix = if prefix.is_empty() { "node".to_string() } else { prefix };

    loop {
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("{prefix}_{}", &suffix[..8]);
        if !taken.contains(&id) {
            return id;
        }
    }
}

/// Give every node in `node` a fresh id, recording each in `taken`.
pub fn reassign_ids(node: &mut Node, taken: &mut HashSet<String>) {
    node.for_each_mut(&mut |n| {
        n.id = fresh_id(&n.kind, taken);
        taken.insert(n.id.clone());
    });
}

/// Replace empty or colliding ids in `node`, keeping the rest.
pub(crate) fn dedupe_ids(node: &mut Node, taken: &mut HashSet<String>) {
    node.for_each_mut(&mut |n| {
        if n.id.is_empty() || taken.contains(&n.id) {
            n.id = fresh_id(&n.kind, taken);
        }
        taken.insert(n.id.clone());
    });
}

/// Normalize a user supplied id: trim, and turn whitespace runs into `_`.
pub fn sanitize_id(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_id_prefix() {
        let id = fresh_id(&NodeKind::Button, &HashSet::new());
        assert!(id.starts_with("button_"));
        assert_eq!(id.len(), "button_".len() + 8);
    }

    #[test]
    fn test_reassign_all_ids() {
        let mut node = Node::new("a", NodeKind::Stack)
            .with_child(Node::new("b", NodeKind::Text))
            .with_child(Node::new("c", NodeKind::Other("Chart".into())));
        let mut taken: HashSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        reassign_ids(&mut node, &mut taken);
        let ids = node.collect_ids();
        assert!(ids.iter().all(|id| !["a", "b", "c"].contains(id)));
        assert!(ids[2].starts_with("chart_"));
        assert_eq!(taken.len(), 6);
    }

    #[test]
    fn test_dedupe_keeps_unique_ids() {
        let mut node = Node::new("keep", NodeKind::Stack).with_child(Node::new("dup", NodeKind::Text));
        let mut taken: HashSet<String> = ["dup".to_string()].into_iter().collect();

        dedupe_ids(&mut node, &mut taken);
        assert_eq!(node.id, "keep");
        assert_ne!(node.children[0].id, "dup");
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("hero  title"), "hero_title");
        assert_eq!(sanitize_id("  padded\tname "), "padded_name");
        assert_eq!(sanitize_id("   "), "");
    }
}
