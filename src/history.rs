//! Snapshot undo/redo stack.
//!
//! Each entry is a full copy of the state, not an inverse operation: undo
//! and redo swap the whole element list. An optional depth limit drops the
//! oldest snapshots once exceeded.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

/// Linear history of full snapshots with a cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    index: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Start a history whose only entry is `initial`. `limit == 0` keeps
    /// every snapshot.
    #[must_use]
    pub fn new(initial: T, limit: usize) -> Self {
        Self { snapshots: vec![initial], index: 0, limit }
    }

    /// Drop all entries and start again from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.index = 0;
    }

    /// Record `snapshot` as the newest state. Discards any redo entries.
    pub fn record(&mut self, snapshot: T) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        if self.limit > 0 && self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back, returning the snapshot to restore.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Step forward, returning the snapshot to restore.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.snapshots.get(self.index)
    }
}
