//! Branch-truncating snapshot history.
//!
//! Each entry is a full, independent copy of the element collection. The
//! cursor always points at a valid entry; committing while the cursor is
//! behind the end drops the abandoned future first.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use tracing::debug;

use crate::element::{Element, ElementCollection};
use crate::error::PersistError;

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<ElementCollection>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self { snapshots: vec![Vec::new()], index: 0 }
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from stored snapshots and cursor.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::IndexOutOfRange`] if `index` does not address a
    /// snapshot (including when `snapshots` is empty).
    pub fn from_parts(snapshots: Vec<ElementCollection>, index: usize) -> Result<Self, PersistError> {
        if index >= snapshots.len() {
            return Err(PersistError::IndexOutOfRange { index, len: snapshots.len() });
        }
        Ok(Self { snapshots, index })
    }

    /// Append `collection` after the cursor, discarding any redo entries.
    pub fn commit(&mut self, collection: ElementCollection) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(collection);
        self.index = self.snapshots.len() - 1;
        debug!(index = self.index, len = self.snapshots.len(), "history commit");
    }

    /// Overwrite the entry at the cursor in place.
    pub fn replace_current(&mut self, collection: ElementCollection) {
        if let Some(slot) = self.snapshots.get_mut(self.index) {
            *slot = collection;
        }
        debug!(index = self.index, len = self.snapshots.len(), "history replace");
    }

    /// Step back one entry. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        debug!(index = self.index, len = self.snapshots.len(), "history undo");
        true
    }

    /// Step forward one entry. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        debug!(index = self.index, len = self.snapshots.len(), "history redo");
        true
    }

    /// The collection at the cursor.
    #[must_use]
    pub fn current(&self) -> &[Element] {
        self.snapshots.get(self.index).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: a history holds at least one snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
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
    pub fn snapshots(&self) -> &[ElementCollection] {
        &self.snapshots
    }

    /// Collapse to a single empty snapshot. Not undoable.
    pub fn reset(&mut self) {
        self.snapshots = vec![Vec::new()];
        self.index = 0;
    }
}
