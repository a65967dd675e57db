//! Snapshot-based undo/redo history.
//!
//! Each entry is a whole copy of the tracked value (for the drawing tool, the
//! full stroke list at the end of a gesture) rather than an inverse
//! operation. `position` points at the snapshot currently shown; it is `None`
//! only while the history is empty.

/// Undo/redo over whole-value snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoRedoStack<T> {
    snapshots: Vec<T>,
    position: Option<usize>,
    limit: Option<usize>,
}

impl<T> Default for UndoRedoStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UndoRedoStack<T> {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            position: None,
            limit: None,
        }
    }

    /// Create a history keeping at most `limit` snapshots (minimum 1).
    /// The oldest snapshot is dropped first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    /// Record a new snapshot, discarding anything that could have been redone.
    pub fn push(&mut self, snapshot: T) {
        match self.position {
            Some(position) => self.snapshots.truncate(position + 1),
            None => self.snapshots.clear(),
        }
        self.snapshots.push(snapshot);

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
            }
        }

        self.position = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot and return it.
    ///
    /// Returns `None` (and leaves the position alone) at the first snapshot.
    pub fn undo(&mut self) -> Option<&T> {
        match self.position {
            Some(position) if position > 0 => {
                self.position = Some(position - 1);
                self.snapshots.get(position - 1)
            }
            _ => None,
        }
    }

    /// Step forward one snapshot and return it.
    ///
    /// Returns `None` (and leaves the position alone) at the latest snapshot.
    pub fn redo(&mut self) -> Option<&T> {
        match self.position {
            Some(position) if position + 1 < self.snapshots.len() => {
                self.position = Some(position + 1);
                self.snapshots.get(position + 1)
            }
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.position, Some(position) if position > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.position, Some(position) if position + 1 < self.snapshots.len())
    }

    /// The snapshot at the current position.
    pub fn current(&self) -> Option<&T> {
        self.position.and_then(|position| self.snapshots.get(position))
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.position = None;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
