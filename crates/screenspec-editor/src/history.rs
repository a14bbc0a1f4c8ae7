//! Snapshot based undo/redo history.

use std::collections::VecDeque;
use std::mem;

use screenspec_core::ScreenSpec;

/// Number of undo snapshots kept. Oldest are evicted first.
pub const HISTORY_LIMIT: usize = 50;

/// Bounded undo/redo stacks of full screen snapshots.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<ScreenSpec>,
    future: Vec<ScreenSpec>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state before a mutation and drop any redo entries.
    pub fn record(&mut self, snapshot: ScreenSpec) {
        self.future.clear();
        self.push_past(snapshot);
    }

    /// Swap `current` with the previous snapshot. Returns false at the start.
    pub fn undo(&mut self, current: &mut ScreenSpec) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.future.push(mem::replace(current, previous));
        true
    }

    /// Swap `current` with the next snapshot. Returns false at the end.
    pub fn redo(&mut self, current: &mut ScreenSpec) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let previous = mem::replace(current, next);
        self.push_past(previous);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redo steps available.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: ScreenSpec) {
        if self.past.len() == self.limit {
            self.past.pop_front();
        }
        self.past.push_back(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenspec_core::{Node, NodeKind};

    fn screen(route: &str) -> ScreenSpec {
        ScreenSpec::new(route, Node::new("root", NodeKind::Stack))
    }

    #[test]
    fn test_undo_redo_swap() {
        let mut history = History::default();
        let mut current = screen("/b");
        history.record(screen("/a"));

        assert!(history.undo(&mut current));
        assert_eq!(current.route, "/a");
        assert!(history.redo(&mut current));
        assert_eq!(current.route, "/b");
    }

    #[test]
    fn test_bounds_are_noops() {
        let mut history = History::default();
        let mut current = screen("/a");
        assert!(!history.undo(&mut current));
        assert!(!history.redo(&mut current));
        assert_eq!(current.route, "/a");
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.record(screen(&format!("/{i}")));
        }
        assert_eq!(history.undo_depth(), 3);

        let mut current = screen("/current");
        while history.undo(&mut current) {}
        assert_eq!(current.route, "/2");
    }

    #[test]
    fn test_record_truncates_redo() {
        let mut history = History::default();
        let mut current = screen("/b");
        history.record(screen("/a"));
        history.undo(&mut current);
        assert!(history.can_redo());

        history.record(current.clone());
        assert!(!history.can_redo());
    }
}
