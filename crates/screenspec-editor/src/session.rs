//! Editing session over a single screen.

use std::collections::{BTreeSet, HashSet};

use screenspec_core::{Breakpoint, DataSource, Interactions, Node, NodeKind, Props, ScreenSpec, Style};
use thiserror::Error;

use crate::history::History;
use crate::ids::{dedupe_ids, fresh_id, reassign_ids, sanitize_id};

/// Why an edit was refused. The document is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("node not found: {0}")]
    NotFound(String),

    #[error("the root node cannot be {0}")]
    RootProtected(&'static str),

    #[error("node is locked: {0}")]
    Locked(String),

    #[error("cannot move {node} into its own subtree at {target}")]
    IntoOwnSubtree { node: String, target: String },

    #[error("node id cannot be empty")]
    EmptyId,

    #[error("node id already in use: {0}")]
    DuplicateId(String),

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Result of an edit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected(Rejection),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            EditOutcome::Applied => None,
            EditOutcome::Rejected(reason) => Some(reason),
        }
    }
}

fn outcome(op: &'static str, result: Result<(), Rejection>) -> EditOutcome {
    match result {
        Ok(()) => {
            tracing::trace!(op, "edit applied");
            EditOutcome::Applied
        }
        Err(reason) => {
            tracing::debug!(op, %reason, "edit rejected");
            EditOutcome::Rejected(reason)
        }
    }
}

/// An editing session: one screen, its history, and editor-local state.
///
/// Selection, hidden and locked flags live beside the document and are never
/// serialized into it.
#[derive(Debug, Clone)]
pub struct EditorSession {
    spec: ScreenSpec,
    history: History,
    selected: Option<String>,
    hidden: BTreeSet<String>,
    locked: BTreeSet<String>,
    clipboard: Option<Node>,
}

impl EditorSession {
    pub fn new(spec: ScreenSpec) -> Self {
        Self::with_history(spec, History::default())
    }

    /// Start a session with a custom history.
    pub fn with_history(spec: ScreenSpec, history: History) -> Self {
        Self {
            spec,
            history,
            selected: None,
            hidden: BTreeSet::new(),
            locked: BTreeSet::new(),
            clipboard: None,
        }
    }

    pub fn spec(&self) -> &ScreenSpec {
        &self.spec
    }

    pub fn tree(&self) -> &Node {
        &self.spec.tree
    }

    pub fn into_spec(self) -> ScreenSpec {
        self.spec
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clipboard(&self) -> Option<&Node> {
        self.clipboard.as_ref()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn is_locked(&self, id: &str) -> bool {
        self.locked.contains(id)
    }

    /// Hidden node ids, sorted.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    /// Locked node ids, sorted.
    pub fn locked(&self) -> impl Iterator<Item = &str> {
        self.locked.iter().map(String::as_str)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Structural edits

    /// Insert `node` under `parent_id`, appending when `index` is `None`.
    ///
    /// Incoming ids that are empty or already used get fresh ones.
    pub fn add_node(&mut self, parent_id: &str, node: Node, index: Option<usize>) -> EditOutcome {
        let result = self.try_add_node(parent_id, node, index);
        outcome("add_node", result)
    }

    fn try_add_node(&mut self, parent_id: &str, mut node: Node, index: Option<usize>) -> Result<(), Rejection> {
        self.find(parent_id)?;
        let mut taken = self.taken_ids();
        dedupe_ids(&mut node, &mut taken);
        let id = node.id.clone();

        self.commit(|tree| insert_child(tree, parent_id, index, node))?;
        self.selected = Some(id);
        Ok(())
    }

    /// Detach the subtree rooted at `id`.
    pub fn remove_node(&mut self, id: &str) -> EditOutcome {
        let result = self.try_remove_node(id);
        outcome("remove_node", result)
    }

    fn try_remove_node(&mut self, id: &str) -> Result<(), Rejection> {
        self.ensure_not_root(id, "removed")?;
        self.ensure_unlocked(id)?;

        let removed = self.commit(|tree| tree.detach(id).ok_or_else(|| not_found(id)))?;
        for removed_id in removed.walk().map(|n| n.id.as_str()) {
            self.forget(removed_id);
        }
        Ok(())
    }

    /// Detach `id` and reinsert it under `new_parent_id` at `new_index`.
    ///
    /// `new_index` is clamped to the child count after detaching.
    pub fn move_node(&mut self, id: &str, new_parent_id: &str, new_index: usize) -> EditOutcome {
        let result = self.try_move_node(id, new_parent_id, new_index);
        outcome("move_node", result)
    }

    fn try_move_node(&mut self, id: &str, new_parent_id: &str, new_index: usize) -> Result<(), Rejection> {
        self.ensure_not_root(id, "moved")?;
        self.ensure_unlocked(id)?;
        self.find(new_parent_id)?;
        if self.spec.tree.is_within(id, new_parent_id) {
            return Err(Rejection::IntoOwnSubtree {
                node: id.to_string(),
                target: new_parent_id.to_string(),
            });
        }

        self.commit(|tree| {
            let node = tree.detach(id).ok_or_else(|| not_found(id))?;
            insert_child(tree, new_parent_id, Some(new_index), node)
        })
    }

    /// Change a node's id. Whitespace in `new_id` becomes `_`.
    pub fn rename_node(&mut self, old_id: &str, new_id: &str) -> EditOutcome {
        let result = self.try_rename_node(old_id, new_id);
        outcome("rename_node", result)
    }

    fn try_rename_node(&mut self, old_id: &str, new_id: &str) -> Result<(), Rejection> {
        let new_id = sanitize_id(new_id);
        if new_id.is_empty() {
            return Err(Rejection::EmptyId);
        }
        self.find(old_id)?;
        if self.spec.tree.contains(&new_id) {
            return Err(Rejection::DuplicateId(new_id));
        }

        self.commit(|tree| {
            let node = tree.find_mut(old_id).ok_or_else(|| not_found(old_id))?;
            node.id = new_id.clone();
            Ok(())
        })?;

        if self.selected.as_deref() == Some(old_id) {
            self.selected = Some(new_id.clone());
        }
        if self.hidden.remove(old_id) {
            self.hidden.insert(new_id.clone());
        }
        if self.locked.remove(old_id) {
            self.locked.insert(new_id);
        }
        Ok(())
    }

    /// Wrap a node in a new `Stack` at the same position.
    pub fn group_into_stack(&mut self, id: &str) -> EditOutcome {
        let result = self.try_group_into_stack(id);
        outcome("group_into_stack", result)
    }

    fn try_group_into_stack(&mut self, id: &str) -> Result<(), Rejection> {
        self.ensure_not_root(id, "grouped")?;
        self.ensure_unlocked(id)?;
        let stack_id = fresh_id(&NodeKind::Stack, &self.taken_ids());

        self.commit(|tree| {
            let (parent, index) = tree.parent_of_mut(id).ok_or_else(|| not_found(id))?;
            let original = parent.children.remove(index);
            parent
                .children
                .insert(index, Node::new(stack_id.clone(), NodeKind::Stack).with_child(original));
            Ok(())
        })?;
        self.selected = Some(stack_id);
        Ok(())
    }

    // Clipboard

    /// Copy a subtree to the clipboard. Not recorded in history.
    pub fn copy(&mut self, id: &str) -> EditOutcome {
        let result = self
            .find(id)
            .map(Node::clone)
            .map(|node| self.clipboard = Some(node));
        outcome("copy", result)
    }

    /// Insert a fresh-id copy of the clipboard after the selection, or at
    /// the end of the root when nothing (or the root) is selected.
    pub fn paste(&mut self) -> EditOutcome {
        let result = self.try_paste();
        outcome("paste", result)
    }

    fn try_paste(&mut self) -> Result<(), Rejection> {
        let mut node = self.clipboard.clone().ok_or(Rejection::EmptyClipboard)?;
        reassign_ids(&mut node, &mut self.taken_ids());
        let id = node.id.clone();

        let (parent_id, index) = self
            .selected
            .as_deref()
            .and_then(|selected| self.spec.tree.parent_of(selected))
            .map(|(parent, index)| (parent.id.clone(), Some(index + 1)))
            .unwrap_or_else(|| (self.spec.tree.id.clone(), None));

        self.commit(|tree| insert_child(tree, &parent_id, index, node))?;
        self.selected = Some(id);
        Ok(())
    }

    /// Insert a fresh-id copy of `id` right after it.
    pub fn duplicate(&mut self, id: &str) -> EditOutcome {
        let result = self.try_duplicate(id);
        outcome("duplicate", result)
    }

    fn try_duplicate(&mut self, id: &str) -> Result<(), Rejection> {
        self.ensure_not_root(id, "duplicated")?;
        let (parent_id, index) = self
            .spec
            .tree
            .parent_of(id)
            .map(|(parent, index)| (parent.id.clone(), index))
            .ok_or_else(|| not_found(id))?;
        let mut copy = self.find(id)?.clone();
        reassign_ids(&mut copy, &mut self.taken_ids());
        let copy_id = copy.id.clone();

        self.commit(|tree| insert_child(tree, &parent_id, Some(index + 1), copy))?;
        self.selected = Some(copy_id);
        Ok(())
    }

    // Content edits

    /// Shallow-merge `patch` into a node's props. `null` values delete keys.
    pub fn update_props(&mut self, id: &str, patch: Props) -> EditOutcome {
        let result = self.edit_node(id, |node| {
            for (key, value) in patch {
                if value.is_null() {
                    node.props.shift_remove(&key);
                } else {
                    node.props.insert(key, value);
                }
            }
        });
        outcome("update_props", result)
    }

    /// Shallow-merge `patch` into the base style, or into one breakpoint's
    /// overrides.
    pub fn update_style(&mut self, id: &str, patch: &Style, breakpoint: Option<Breakpoint>) -> EditOutcome {
        let result = self.edit_node(id, |node| {
            let style = match breakpoint {
                None => &mut node.style,
                Some(breakpoint) => node.responsive.get_mut(breakpoint),
            };
            style.merge(patch);
        });
        outcome("update_style", result)
    }

    pub fn set_interactions(&mut self, id: &str, interactions: Interactions) -> EditOutcome {
        let result = self.edit_node(id, |node| node.interactions = interactions);
        outcome("set_interactions", result)
    }

    pub fn set_data_source(&mut self, id: &str, source: Option<DataSource>) -> EditOutcome {
        let result = self.edit_node(id, |node| node.data_source = source);
        outcome("set_data_source", result)
    }

    // Editor-local state

    pub fn select(&mut self, id: Option<&str>) -> EditOutcome {
        let result = match id {
            None => {
                self.selected = None;
                Ok(())
            }
            Some(id) => self.find(id).map(|_| ()).map(|()| self.selected = Some(id.to_string())),
        };
        outcome("select", result)
    }

    pub fn toggle_hidden(&mut self, id: &str) -> EditOutcome {
        let result = self.find(id).map(|_| ()).map(|()| toggle(&mut self.hidden, id));
        outcome("toggle_hidden", result)
    }

    pub fn toggle_locked(&mut self, id: &str) -> EditOutcome {
        let result = self.find(id).map(|_| ()).map(|()| toggle(&mut self.locked, id));
        outcome("toggle_locked", result)
    }

    // History

    pub fn undo(&mut self) -> EditOutcome {
        let result = if self.history.undo(&mut self.spec) {
            self.forget_missing();
            Ok(())
        } else {
            Err(Rejection::NothingToUndo)
        };
        outcome("undo", result)
    }

    pub fn redo(&mut self) -> EditOutcome {
        let result = if self.history.redo(&mut self.spec) {
            self.forget_missing();
            Ok(())
        } else {
            Err(Rejection::NothingToRedo)
        };
        outcome("redo", result)
    }

    // Internals

    /// Apply `edit` to the tree, recording the prior state on success and
    /// restoring it on failure.
    fn commit<T>(&mut self, edit: impl FnOnce(&mut Node) -> Result<T, Rejection>) -> Result<T, Rejection> {
        let snapshot = self.spec.clone();
        match edit(&mut self.spec.tree) {
            Ok(value) => {
                self.history.record(snapshot);
                Ok(value)
            }
            Err(reason) => {
                self.spec = snapshot;
                Err(reason)
            }
        }
    }

    fn edit_node(&mut self, id: &str, edit: impl FnOnce(&mut Node)) -> Result<(), Rejection> {
        self.ensure_unlocked(id)?;
        self.commit(|tree| {
            let node = tree.find_mut(id).ok_or_else(|| not_found(id))?;
            edit(node);
            Ok(())
        })
    }

    fn find(&self, id: &str) -> Result<&Node, Rejection> {
        self.spec.tree.find(id).ok_or_else(|| not_found(id))
    }

    fn ensure_not_root(&self, id: &str, action: &'static str) -> Result<(), Rejection> {
        if self.spec.tree.id == id {
            return Err(Rejection::RootProtected(action));
        }
        Ok(())
    }

    fn ensure_unlocked(&self, id: &str) -> Result<(), Rejection> {
        self.find(id)?;
        if self.locked.contains(id) {
            return Err(Rejection::Locked(id.to_string()));
        }
        Ok(())
    }

    fn taken_ids(&self) -> HashSet<String> {
        self.spec.tree.walk().map(|n| n.id.clone()).collect()
    }

    fn forget(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.hidden.remove(id);
        self.locked.remove(id);
    }

    /// Drop editor-local state for ids no longer in the tree.
    fn forget_missing(&mut self) {
        let live = self.taken_ids();
        if self.selected.as_ref().is_some_and(|id| !live.contains(id)) {
            self.selected = None;
        }
        self.hidden.retain(|id| live.contains(id));
        self.locked.retain(|id| live.contains(id));
    }
}

fn not_found(id: &str) -> Rejection {
    Rejection::NotFound(id.to_string())
}

fn toggle(set: &mut BTreeSet<String>, id: &str) {
    if !set.remove(id) {
        set.insert(id.to_string());
    }
}

fn insert_child(tree: &mut Node, parent_id: &str, index: Option<usize>, node: Node) -> Result<(), Rejection> {
    let parent = tree.find_mut(parent_id).ok_or_else(|| not_found(parent_id))?;
    let len = parent.children.len();
    parent.children.insert(index.map_or(len, |i| i.min(len)), node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenspec_core::{ActionKind, DataSourceKind, Interaction, StyleProperty, StyleValue};
    use serde_json::{json, Value};

    fn session() -> EditorSession {
        let tree = Node::new("root", NodeKind::Stack)
            .with_child(
                Node::new("header", NodeKind::Container)
                    .with_child(Node::new("title", NodeKind::Heading).with_prop("text", "Hello")),
            )
            .with_child(Node::new("body", NodeKind::Text).with_prop("text", "Body"))
            .with_child(Node::new("cta", NodeKind::Button).with_prop("label", "Go"));
        EditorSession::new(ScreenSpec::new("/home", tree))
    }

    fn child_ids(node: &Node) -> Vec<&str> {
        node.children.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_remove_root_is_rejected() {
        let mut s = session();
        let before = s.spec().clone();

        let outcome = s.remove_node("root");
        assert_eq!(outcome, EditOutcome::Rejected(Rejection::RootProtected("removed")));
        assert_eq!(s.spec(), &before);
        assert!(!s.can_undo());
    }

    #[test]
    fn test_rename_onto_existing_id_is_rejected() {
        let mut s = session();
        s.add_node("root", Node::new("a", NodeKind::Text), None);
        s.add_node("root", Node::new("b", NodeKind::Text), None);
        let before = s.spec().clone();
        let depth = s.history().undo_depth();

        let outcome = s.rename_node("a", "b");
        assert_eq!(outcome.rejection(), Some(&Rejection::DuplicateId("b".into())));
        assert_eq!(s.spec(), &before);
        assert_eq!(s.history().undo_depth(), depth);
    }

    #[test]
    fn test_add_node_appends_and_selects() {
        let mut s = session();
        assert!(s.add_node("header", Node::new("subtitle", NodeKind::Text), None).is_applied());
        assert_eq!(child_ids(s.tree().find("header").unwrap()), vec!["title", "subtitle"]);
        assert_eq!(s.selected(), Some("subtitle"));
    }

    #[test]
    fn test_add_node_clamps_index() {
        let mut s = session();
        s.add_node("root", Node::new("last", NodeKind::Divider), Some(99));
        s.add_node("root", Node::new("first", NodeKind::Divider), Some(0));
        assert_eq!(child_ids(s.tree()), vec!["first", "header", "body", "cta", "last"]);
    }

    #[test]
    fn test_add_node_renames_colliding_ids() {
        let mut s = session();
        let incoming = Node::new("body", NodeKind::Card).with_child(Node::new("fresh", NodeKind::Text));
        s.add_node("root", incoming, None);

        assert!(s.tree().duplicate_ids().is_empty());
        let added = s.tree().children.last().unwrap();
        assert!(added.id.starts_with("card_"));
        assert_eq!(added.children[0].id, "fresh");
    }

    #[test]
    fn test_add_node_missing_parent() {
        let mut s = session();
        let outcome = s.add_node("nope", Node::new("x", NodeKind::Text), None);
        assert_eq!(outcome.rejection(), Some(&Rejection::NotFound("nope".into())));
        assert!(!s.can_undo());
    }

    #[test]
    fn test_remove_clears_editor_state() {
        let mut s = session();
        s.select(Some("title"));
        s.toggle_hidden("title");

        assert!(s.remove_node("header").is_applied());
        assert!(s.tree().find("title").is_none());
        assert_eq!(s.selected(), None);
        assert!(!s.is_hidden("title"));
    }

    #[test]
    fn test_locked_node_guards() {
        let mut s = session();
        s.toggle_locked("body");

        let locked = Some(Rejection::Locked("body".into()));
        assert_eq!(s.remove_node("body").rejection(), locked.as_ref());
        assert_eq!(s.move_node("body", "header", 0).rejection(), locked.as_ref());
        let patch = Props::from_iter([("text".to_string(), json!("changed"))]);
        assert_eq!(s.update_props("body", patch).rejection(), locked.as_ref());
        let style = Style::new().with(StyleProperty::Padding, 4.0);
        assert_eq!(s.update_style("body", &style, None).rejection(), locked.as_ref());
        assert!(!s.can_undo());

        s.toggle_locked("body");
        assert!(s.remove_node("body").is_applied());
    }

    #[test]
    fn test_move_between_parents() {
        let mut s = session();
        assert!(s.move_node("cta", "header", 0).is_applied());
        assert_eq!(child_ids(s.tree()), vec!["header", "body"]);
        assert_eq!(child_ids(s.tree().find("header").unwrap()), vec!["cta", "title"]);
    }

    #[test]
    fn test_move_into_own_subtree_is_rejected() {
        let mut s = session();
        let before = s.spec().clone();

        let outcome = s.move_node("header", "title", 0);
        assert!(matches!(outcome.rejection(), Some(Rejection::IntoOwnSubtree { .. })));
        let outcome = s.move_node("header", "header", 0);
        assert!(matches!(outcome.rejection(), Some(Rejection::IntoOwnSubtree { .. })));
        assert_eq!(s.move_node("root", "header", 0).rejection(), Some(&Rejection::RootProtected("moved")));
        assert_eq!(s.spec(), &before);
    }

    #[test]
    fn test_rename_sanitizes_and_propagates() {
        let mut s = session();
        s.select(Some("body"));
        s.toggle_locked("body");

        assert!(s.rename_node("body", "  main copy ").is_applied());
        assert!(s.tree().find("main_copy").is_some());
        assert_eq!(s.selected(), Some("main_copy"));
        assert!(s.is_locked("main_copy"));
        assert!(!s.is_locked("body"));

        assert_eq!(s.rename_node("main_copy", " \t").rejection(), Some(&Rejection::EmptyId));
    }

    #[test]
    fn test_group_into_stack() {
        let mut s = session();
        assert!(s.group_into_stack("body").is_applied());

        let group = &s.tree().children[1];
        assert_eq!(group.kind, NodeKind::Stack);
        assert_eq!(child_ids(group), vec!["body"]);
        assert_eq!(s.selected(), Some(group.id.as_str()));
        assert_eq!(
            s.group_into_stack("root").rejection(),
            Some(&Rejection::RootProtected("grouped"))
        );
    }

    #[test]
    fn test_copy_paste_assigns_fresh_ids() {
        let mut s = session();
        assert_eq!(s.paste().rejection(), Some(&Rejection::EmptyClipboard));

        s.copy("header");
        assert!(!s.can_undo());
        s.paste();
        s.paste();

        assert!(s.tree().duplicate_ids().is_empty());
        assert_eq!(s.tree().children.len(), 5);
        let pasted = s.tree().children.last().unwrap();
        assert_eq!(pasted.kind, NodeKind::Container);
        assert_eq!(pasted.children[0].prop_str("text"), Some("Hello"));
    }

    #[test]
    fn test_paste_after_selection() {
        let mut s = session();
        s.copy("cta");
        s.select(Some("header"));
        s.paste();

        let ids = child_ids(s.tree());
        assert_eq!(ids[0], "header");
        assert!(ids[1].starts_with("button_"));
        assert_eq!(&ids[2..], &["body", "cta"]);
    }

    #[test]
    fn test_paste_with_root_selected_appends() {
        let mut s = session();
        s.copy("body");
        s.select(Some("root"));
        s.paste();
        assert!(s.tree().children[3].id.starts_with("text_"));
    }

    #[test]
    fn test_duplicate_inserts_after_source() {
        let mut s = session();
        assert!(s.duplicate("header").is_applied());

        let ids = child_ids(s.tree());
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], "header");
        assert!(ids[1].starts_with("container_"));
        assert!(s.tree().duplicate_ids().is_empty());
        assert_eq!(s.duplicate("root").rejection(), Some(&Rejection::RootProtected("duplicated")));
    }

    #[test]
    fn test_update_props_null_deletes() {
        let mut s = session();
        let patch = Props::from_iter([
            ("label".to_string(), Value::Null),
            ("variant".to_string(), json!("primary")),
        ]);
        s.update_props("cta", patch);

        let cta = s.tree().find("cta").unwrap();
        assert!(cta.props.get("label").is_none());
        assert_eq!(cta.prop_str("variant"), Some("primary"));
    }

    #[test]
    fn test_update_style_per_breakpoint() {
        let mut s = session();
        s.update_style("body", &Style::new().with(StyleProperty::FontSize, 18.0), None);
        s.update_style(
            "body",
            &Style::new().with(StyleProperty::FontSize, 14.0),
            Some(Breakpoint::Mobile),
        );

        let body = s.tree().find("body").unwrap();
        assert_eq!(body.style.get(StyleProperty::FontSize), Some(&StyleValue::Number(18.0)));
        assert_eq!(
            body.responsive.mobile.get(StyleProperty::FontSize),
            Some(&StyleValue::Number(14.0))
        );
        assert!(body.responsive.tablet.is_empty());
    }

    #[test]
    fn test_interactions_and_data_source() {
        let mut s = session();
        let interactions = Interactions {
            on_click: Some(Interaction {
                action: ActionKind::Navigate,
                target: Some("/next".into()),
                value: None,
            }),
            ..Interactions::default()
        };
        assert!(s.set_interactions("cta", interactions.clone()).is_applied());

        let source = DataSource {
            kind: DataSourceKind::Static,
            url: None,
            data: Some(json!([1, 2])),
            mapping: Default::default(),
        };
        assert!(s.set_data_source("body", Some(source)).is_applied());

        assert_eq!(s.tree().find("cta").unwrap().interactions, interactions);
        assert!(s.tree().find("body").unwrap().data_source.is_some());
        assert_eq!(s.history().undo_depth(), 2);
    }

    #[test]
    fn test_editor_state_is_not_history() {
        let mut s = session();
        s.select(Some("body"));
        s.toggle_hidden("body");
        s.toggle_locked("cta");
        assert!(!s.can_undo());
        assert_eq!(s.select(Some("ghost")).rejection(), Some(&Rejection::NotFound("ghost".into())));
        assert_eq!(s.selected(), Some("body"));

        s.toggle_hidden("body");
        assert!(!s.is_hidden("body"));
        assert_eq!(s.locked().collect::<Vec<_>>(), vec!["cta"]);
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut s = session();
        let original = s.spec().clone();
        s.remove_node("body");
        let edited = s.spec().clone();

        assert!(s.undo().is_applied());
        assert_eq!(s.spec(), &original);
        assert!(s.redo().is_applied());
        assert_eq!(s.spec(), &edited);

        assert_eq!(s.redo().rejection(), Some(&Rejection::NothingToRedo));
        s.undo();
        assert_eq!(s.undo().rejection(), Some(&Rejection::NothingToUndo));
        assert_eq!(s.spec(), &original);
    }

    #[test]
    fn test_undo_clears_stale_selection() {
        let mut s = session();
        s.add_node("root", Node::new("temp", NodeKind::Text), None);
        assert_eq!(s.selected(), Some("temp"));
        s.undo();
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_new_edit_truncates_redo() {
        let mut s = session();
        s.remove_node("body");
        s.undo();
        assert!(s.can_redo());
        s.remove_node("cta");
        assert!(!s.can_redo());
    }

    #[test]
    fn test_history_is_capped() {
        let mut s = session();
        for i in 0..60 {
            s.add_node("root", Node::new(format!("n{i}"), NodeKind::Divider), None);
        }
        assert_eq!(s.history().undo_depth(), crate::HISTORY_LIMIT);

        while s.undo().is_applied() {}
        assert!(s.tree().find("n9").is_some());
        assert!(s.tree().find("n10").is_none());
    }
}
