use crate::model::Portfolio;

const UNDO_STACK_LIMIT: usize = 100;

/// One reversible step: the collection as it was, and what replaced it
#[derive(Debug, Clone)]
struct Entry {
    label: &'static str,
    snapshot: Portfolio,
}

/// Snapshot-based undo/redo history.
///
/// Each entry keeps a whole `Portfolio`. Projects are `Arc`-shared between
/// neighbouring snapshots, so an entry costs one vector of pointers plus the
/// projects the step actually changed.
#[derive(Debug, Default)]
pub struct UndoStack {
    undo: Vec<Entry>,
    redo: Vec<Entry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `before` as the state preceding a mutation. Clears the redo stack.
    pub fn push(&mut self, label: &'static str, before: Portfolio) {
        self.undo.push(Entry {
            label,
            snapshot: before,
        });
        if self.undo.len() > UNDO_STACK_LIMIT {
            self.undo.drain(..self.undo.len() - UNDO_STACK_LIMIT);
        }
        self.redo.clear();
    }

    /// Step back. `current` moves onto the redo stack; returns the restored
    /// collection and the label of the undone action.
    pub fn undo(&mut self, current: &Portfolio) -> Option<(Portfolio, &'static str)> {
        let entry = self.undo.pop()?;
        self.redo.push(Entry {
            label: entry.label,
            snapshot: current.clone(),
        });
        Some((entry.snapshot, entry.label))
    }

    /// Re-apply the last undone action
    pub fn redo(&mut self, current: &Portfolio) -> Option<(Portfolio, &'static str)> {
        let entry = self.redo.pop()?;
        self.undo.push(Entry {
            label: entry.label,
            snapshot: current.clone(),
        });
        Some((entry.snapshot, entry.label))
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
