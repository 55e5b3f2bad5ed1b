use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,
}

/// Snapshot of the undo/redo affordances, handed to observers after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    /// Index of the current entry, `None` while the log is empty.
    pub position: Option<usize>,
    pub len: usize,
}

/// Receives a [`HistoryStatus`] whenever the log or its cursor changes
/// (enable/disable undo and redo buttons, etc).
pub trait HistoryObserver {
    fn history_changed(&mut self, status: HistoryStatus);
}

impl<F: FnMut(HistoryStatus)> HistoryObserver for F {
    fn history_changed(&mut self, status: HistoryStatus) {
        self(status)
    }
}

/// A bounded, linear undo/redo log of whole-state snapshots.
///
/// Entries are owned copies: `push` stores a clone of the caller's state and
/// `undo`/`redo` hand back clones, so nothing outside the log can alias an entry.
/// Pushing after an undo discards the redo branch. When the log is over capacity the
/// oldest entry is evicted.
pub struct History<T> {
    entries: Vec<T>,
    cursor: Option<usize>,
    max_size: usize,
    observer: Option<Box<dyn HistoryObserver>>,
}

impl<T: Clone> History<T> {
    pub fn new(max_size: usize) -> Result<Self, HistoryError> {
        if max_size == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        Ok(Self {
            entries: Vec::new(),
            cursor: None,
            max_size,
            observer: None,
        })
    }

    pub fn set_observer(&mut self, observer: impl HistoryObserver + 'static) {
        self.observer = Some(Box::new(observer));
        self.notify();
    }

    pub fn push(&mut self, state: &T) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        let pruned = self.entries.len().saturating_sub(keep);
        self.entries.truncate(keep);
        self.entries.push(state.clone());

        let mut evicted = 0;
        while self.entries.len() > self.max_size {
            self.entries.remove(0);
            evicted += 1;
        }
        self.cursor = Some(self.entries.len() - 1);

        debug!(
            len = self.entries.len(),
            pruned, evicted, "history: pushed snapshot"
        );
        self.notify();
    }

    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            trace!("history: nothing to undo");
            return None;
        }
        let cursor = self.cursor? - 1;
        self.cursor = Some(cursor);
        debug!(cursor, "history: undo");
        self.notify();
        self.entries.get(cursor).cloned()
    }

    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            trace!("history: nothing to redo");
            return None;
        }
        let cursor = self.cursor? + 1;
        self.cursor = Some(cursor);
        debug!(cursor, "history: redo");
        self.notify();
        self.entries.get(cursor).cloned()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.notify();
    }
}

impl<T> History<T> {
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The entry the cursor points at.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor?)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            position: self.cursor,
            len: self.entries.len(),
        }
    }

    fn notify(&mut self) {
        let status = self.status();
        if let Some(observer) = self.observer.as_mut() {
            observer.history_changed(status);
        }
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_size: DEFAULT_HISTORY_CAPACITY,
            observer: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries)
            .field("cursor", &self.cursor)
            .field("max_size", &self.max_size)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
