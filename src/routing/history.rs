//! In-memory navigation history.
//!
//! Entries are kept oldest first with a cursor on the active entry. Pushing
//! while the cursor is not at the end discards the forward entries, the same
//! way a browser tab does.

use std::collections::VecDeque;

use crate::routing::location::Location;
use crate::routing::table::RouteMatch;

/// One visited location and what it resolved to.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub location: Location,
    /// `None` when the location matched no route.
    pub matched: Option<RouteMatch>,
}

/// Bounded back/forward stack.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    max_entries: usize,
}

impl History {
    /// Create an empty history holding at most `max_entries` (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new entry after the current one.
    pub fn push(&mut self, entry: HistoryEntry) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(entry);

        // Evict oldest entries beyond the limit
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrite the current entry, or record it if the history is empty.
    pub fn replace(&mut self, entry: HistoryEntry) {
        if self.entries.is_empty() {
            self.push(entry);
        } else {
            self.entries[self.cursor] = entry;
        }
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.can_go_back() {
            self.cursor -= 1;
            self.entries.get(self.cursor)
        } else {
            None
        }
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.can_go_forward() {
            self.cursor += 1;
            self.entries.get(self.cursor)
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> HistoryEntry {
        HistoryEntry {
            location: Location::parse(path).unwrap(),
            matched: None,
        }
    }

    fn current_path(history: &History) -> &str {
        history.current().unwrap().location.path()
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = History::new(10);
        assert!(history.current().is_none());
        assert!(history.back().is_none());

        history.push(entry("/"));
        history.push(entry("/device/42"));
        assert_eq!(current_path(&history), "/device/42");

        assert_eq!(history.back().unwrap().location.path(), "/");
        assert!(history.back().is_none());
        assert_eq!(history.forward().unwrap().location.path(), "/device/42");
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = History::new(10);
        history.push(entry("/"));
        history.push(entry("/device/1"));
        history.back();
        history.push(entry("/device/2"));

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(current_path(&history), "/device/2");
    }

    #[test]
    fn test_replace() {
        let mut history = History::new(10);
        history.replace(entry("/"));
        assert_eq!(history.len(), 1);

        history.push(entry("/device/1"));
        history.replace(entry("/device/2"));
        assert_eq!(history.len(), 2);
        assert_eq!(current_path(&history), "/device/2");
        assert_eq!(history.back().unwrap().location.path(), "/");
    }

    #[test]
    fn test_bounded() {
        let mut history = History::new(2);
        history.push(entry("/a"));
        history.push(entry("/b"));
        history.push(entry("/c"));

        let paths: Vec<_> = history.entries().map(|e| e.location.path()).collect();
        assert_eq!(paths, vec!["/b", "/c"]);
        assert_eq!(current_path(&history), "/c");
    }
}
