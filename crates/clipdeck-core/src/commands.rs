use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::timeline::Timeline;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A committed state of the timeline (tracks and clips).
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    description: String,
    snapshot: Rc<Timeline>,
}

impl HistoryEntry {
    fn capture(description: impl Into<String>, timeline: &Timeline) -> Self {
        Self {
            description: description.into(),
            snapshot: Rc::new(timeline.clone()),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn snapshot(&self) -> &Timeline {
        &self.snapshot
    }
}

/// Bounded undo/redo log of snapshots with a cursor.
///
/// Entry 0 is the state the log was created with, so undoing every commit
/// lands back there. Snapshots are shared, and restoring clones out of them;
/// restoring never records a new entry.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    capacity: usize,
}

impl CommandHistory {
    pub fn new(initial: &Timeline) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(initial: &Timeline, capacity: usize) -> Self {
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(HistoryEntry::capture("Initial state", initial));
        Self {
            entries,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Run an operation on the timeline and record the result. If the
    /// operation fails, the timeline is put back the way it was and nothing
    /// is recorded.
    pub fn execute<F, T>(&mut self, timeline: &mut Timeline, description: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Timeline) -> Result<T>,
    {
        let before = timeline.clone();
        match f(timeline) {
            Ok(result) => {
                self.record(timeline, description);
                Ok(result)
            }
            Err(e) => {
                *timeline = before;
                Err(e)
            }
        }
    }

    /// Snapshot the current timeline as a new entry, discarding any redo
    /// branch and evicting the oldest entry past capacity.
    pub fn record(&mut self, timeline: &Timeline, description: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries
            .push_back(HistoryEntry::capture(description, timeline));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
        debug!(description, len = self.entries.len(), "history recorded");
    }

    /// Step back one entry and restore it.
    pub fn undo(&mut self, timeline: &mut Timeline) -> Result<()> {
        if !self.can_undo() {
            return Err(CoreError::NothingToUndo);
        }
        info!(description = self.entries[self.cursor].description(), "undo");
        self.cursor -= 1;
        *timeline = self.entries[self.cursor].snapshot().clone();
        Ok(())
    }

    /// Step forward one entry and restore it.
    pub fn redo(&mut self, timeline: &mut Timeline) -> Result<()> {
        if !self.can_redo() {
            return Err(CoreError::NothingToRedo);
        }
        self.cursor += 1;
        info!(description = self.entries[self.cursor].description(), "redo");
        *timeline = self.entries[self.cursor].snapshot().clone();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Description of the change `undo` would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.can_undo()
            .then(|| self.entries[self.cursor].description())
    }

    /// Description of the change `redo` would reapply.
    pub fn redo_description(&self) -> Option<&str> {
        self.entries.get(self.cursor + 1).map(|e| e.description())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Forget everything and start over from `timeline`.
    pub fn reset(&mut self, timeline: &Timeline) {
        *self = Self::with_capacity(timeline, self.capacity);
    }
}
