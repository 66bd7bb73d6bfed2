//! Bounded snapshot history (undo only).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::model::Annotation;

/// Deep copy of the committed state, captured before a mutation lands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub annotations: Vec<Annotation>,
    pub meters_per_pixel: f64,
}

/// Pre-mutation snapshots behind a fixed capacity; the oldest entry is
/// dropped on overflow.
///
/// Undo restores the most recent snapshot and keeps yielding the empty,
/// uncalibrated baseline once the list is exhausted. There is no redo:
/// a new edit permanently invalidates forward history, so forward
/// entries are never kept at all.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl SnapshotHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of snapshots available to undo through.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Records the state as it was before the mutation about to land.
    pub fn record(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Restores the most recent snapshot, or the empty/uncalibrated
    /// baseline when the history is exhausted.
    pub fn undo(&mut self) -> Snapshot {
        self.entries.pop_back().unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
