use super::error::AnnotError;
use super::record::CircleRecord;
use super::store::CircleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoKind {
    Add,
    Delete,
}

/// A reversible action, holding a copy of the affected record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UndoEntry {
    pub kind: UndoKind,
    pub record: CircleRecord,
}

/// Linear, LIFO history of add/delete actions. There is no redo: an undone
/// entry is dropped.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peek(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    pub fn push_add(&mut self, record: CircleRecord) {
        self.entries.push(UndoEntry {
            kind: UndoKind::Add,
            record,
        });
    }

    pub fn push_delete(&mut self, record: CircleRecord) {
        self.entries.push(UndoEntry {
            kind: UndoKind::Delete,
            record,
        });
    }

    /// Reverse the most recent entry against `store`.
    ///
    /// Returns `Ok(false)` when the log is empty. The entry is consumed even
    /// when reversing it fails, since a failure means the store no longer
    /// matches the history.
    pub fn undo(&mut self, store: &mut CircleStore) -> Result<bool, AnnotError> {
        let Some(entry) = self.entries.pop() else {
            return Ok(false);
        };
        match entry.kind {
            UndoKind::Add => {
                store.remove(entry.record.id)?;
            }
            UndoKind::Delete => store.restore(entry.record)?,
        }
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
