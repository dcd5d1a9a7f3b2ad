//! Snapshot history for undo/redo
//!
//! Each open file keeps the full text of its last [`MAX_SNAPSHOTS`] states.
//! Pushing a new snapshot after undoing discards everything ahead of the
//! current position; pushing past capacity evicts the oldest snapshot.

use std::collections::VecDeque;

/// Number of snapshots retained per file
pub const MAX_SNAPSHOTS: usize = 50;

/// Bounded undo/redo ring over text snapshots
#[derive(Debug, Clone)]
pub struct HistoryRing {
    snapshots: VecDeque<String>,
    /// Position of the current snapshot in `snapshots`
    index: usize,
    capacity: usize,
}

impl HistoryRing {
    /// Start a history whose only entry is `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_capacity(initial, MAX_SNAPSHOTS)
    }

    /// Start a history holding at most `capacity` snapshots (minimum 1)
    pub fn with_capacity(initial: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(initial.into());
        Self {
            snapshots,
            index: 0,
            capacity,
        }
    }

    /// Record a new current snapshot (clears redo)
    pub fn push(&mut self, snapshot: impl Into<String>) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push_back(snapshot.into());
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot and return it
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index).map(String::as_str)
    }

    /// Step forward one snapshot and return it
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index).map(String::as_str)
    }

    /// The snapshot at the current position
    pub fn current(&self) -> &str {
        self.snapshots
            .get(self.index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Drop all history and start over from `snapshot`
    pub fn reset(&mut self, snapshot: impl Into<String>) {
        self.snapshots.clear();
        self.snapshots.push_back(snapshot.into());
        self.index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; a history holds at least its initial snapshot
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(String::new())
    }
}
