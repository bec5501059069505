//! Linear undo/redo history over full element-collection snapshots.

use crate::Element;

/// Snapshot-based edit history with a cursor.
///
/// Invariant: `cursor < snapshots.len()` at all times, and outside of an
/// in-progress gesture the live element collection equals
/// `snapshots[cursor]`. Every commit stores a deep copy, so later in-place
/// mutation of live elements never aliases a stored snapshot.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    cursor: usize,
}

impl History {
    /// Create a history seeded with the initial collection.
    #[must_use]
    pub fn new(initial: &[Element]) -> Self {
        Self {
            snapshots: vec![initial.to_vec()],
            cursor: 0,
        }
    }

    /// Record a new snapshot, discarding any redo branch.
    pub fn commit(&mut self, snapshot: &[Element]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot.to_vec());
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one entry. Returns `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one entry. Returns `None` when already at the newest.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if self.cursor + 1 == self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// A history always holds at least the initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(&[])
    }
}
