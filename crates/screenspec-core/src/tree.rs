//! Tree navigation helpers.

use std::collections::HashSet;

use crate::model::Node;

/// Pre-order iterator over a subtree.
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Node {
    /// Iterate this node and all descendants in pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Find a node by id in this subtree.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.walk().find(|n| n.id == id)
    }

    /// Find a node by id in this subtree, mutably.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// The parent of `id` and the child's index within it.
    pub fn parent_of(&self, id: &str) -> Option<(&Node, usize)> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            return Some((self, index));
        }
        self.children.iter().find_map(|c| c.parent_of(id))
    }

    /// The parent of `id` and the child's index within it, mutably.
    pub fn parent_of_mut(&mut self, id: &str) -> Option<(&mut Node, usize)> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            return Some((self, index));
        }
        self.children.iter_mut().find_map(|c| c.parent_of_mut(id))
    }

    /// Whether `id` is this node or one of its descendants.
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Whether `id` is `ancestor` itself or lies below it.
    pub fn is_within(&self, ancestor: &str, id: &str) -> bool {
        self.find(ancestor).is_some_and(|a| a.contains(id))
    }

    /// Detach the node with `id` from this subtree.
    ///
    /// The node itself cannot detach itself; use the parent.
    pub fn detach(&mut self, id: &str) -> Option<Node> {
        let (parent, index) = self.parent_of_mut(id)?;
        Some(parent.children.remove(index))
    }

    /// All ids in pre-order.
    pub fn collect_ids(&self) -> Vec<&str> {
        self.walk().map(|n| n.id.as_str()).collect()
    }

    /// Ids that occur more than once, in order of second occurrence.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for node in self.walk() {
            if !seen.insert(node.id.as_str()) && !duplicates.contains(&node.id) {
                duplicates.push(node.id.clone());
            }
        }
        duplicates
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        self.walk().count()
    }

    /// Apply `f` to this node and all descendants, parents first.
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }
}
