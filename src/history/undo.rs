//! Undo/redo snapshots for the request editor.
//!
//! Every snapshot is a full copy of the editor text. User typing is debounced
//! so that a burst of keystrokes collapses into one snapshot, while
//! programmatic rewrites (transforms) are bracketed into exactly one undoable
//! step.

use log::debug;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of undo snapshots kept by default.
pub const DEFAULT_UNDO_LIMIT: usize = 50;

/// Default idle window before a pending edit is committed.
pub const DEFAULT_EDIT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEdit {
    text: String,
    last_input: Instant,
}

/// Bounded undo stack with a redo stack and debounced edit capture.
///
/// The undo stack is seeded with the initial text and never drops below that
/// one element, so the top of the stack is always the current state.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<String>,
    redo_stack: Vec<String>,
    limit: usize,
    debounce: Duration,
    pending: Option<PendingEdit>,
    programmatic: bool,
}

impl EditHistory {
    /// Creates a history seeded with `initial` and default settings.
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_settings(initial, DEFAULT_UNDO_LIMIT, DEFAULT_EDIT_DEBOUNCE)
    }

    /// Creates a history with an explicit snapshot limit and idle window.
    ///
    /// A limit of zero is treated as one.
    pub fn with_settings(initial: impl Into<String>, limit: usize, debounce: Duration) -> Self {
        let mut undo_stack = VecDeque::with_capacity(limit.min(DEFAULT_UNDO_LIMIT));
        undo_stack.push_back(initial.into());
        Self {
            undo_stack,
            redo_stack: Vec::new(),
            limit: limit.max(1),
            debounce,
            pending: None,
            programmatic: false,
        }
    }

    /// The most recently committed snapshot.
    pub fn current(&self) -> &str {
        self.undo_stack.back().map(String::as_str).unwrap_or_default()
    }

    /// Records `text` as a new snapshot immediately.
    ///
    /// Ignored while a programmatic change is in progress or when `text`
    /// equals the current snapshot. Otherwise clears the redo stack.
    pub fn commit(&mut self, text: impl Into<String>) {
        if self.programmatic {
            return;
        }
        let text = text.into();
        if self.current() == text {
            return;
        }
        self.push_undo(text);
        self.redo_stack.clear();
    }

    /// Records a user edit, committed once input has been idle for the
    /// debounce window.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.edit_at(text, Instant::now());
    }

    /// Records a user edit observed at `now`.
    ///
    /// Successive edits inside the idle window replace each other, so only
    /// the last text of a burst becomes a snapshot.
    pub fn edit_at(&mut self, text: impl Into<String>, now: Instant) {
        if self.programmatic {
            return;
        }
        self.pending = Some(PendingEdit {
            text: text.into(),
            last_input: now,
        });
    }

    /// Commits the pending edit if its idle window has elapsed by `now`.
    ///
    /// Returns `true` if a pending edit was consumed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = self
            .pending
            .as_ref()
            .map(|p| now.saturating_duration_since(p.last_input) >= self.debounce)
            .unwrap_or(false);
        if due {
            self.flush();
        }
        due
    }

    /// Commits the pending edit immediately, if any.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.commit(pending.text);
        }
    }

    /// Whether an edit is waiting for its idle window.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Steps back one snapshot and returns the restored text.
    ///
    /// Returns `None` when only the initial snapshot remains.
    pub fn undo(&mut self) -> Option<&str> {
        self.flush();
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let top = self.undo_stack.pop_back()?;
        self.redo_stack.push(top);
        self.undo_stack.back().map(String::as_str)
    }

    /// Re-applies the most recently undone snapshot and returns it.
    pub fn redo(&mut self) -> Option<&str> {
        self.flush();
        let text = self.redo_stack.pop()?;
        self.push_undo(text);
        self.undo_stack.back().map(String::as_str)
    }

    /// Opens a programmatic change.
    ///
    /// Drops any pending user edit, snapshots `current` as the state to
    /// return to and suspends snapshotting until
    /// [`end_programmatic_change`](Self::end_programmatic_change).
    pub fn begin_programmatic_change(&mut self, current: impl Into<String>) {
        if self.pending.take().is_some() {
            debug!("Discarding pending edit for programmatic change");
        }
        self.commit(current);
        self.programmatic = true;
    }

    /// Closes a programmatic change and snapshots its result.
    pub fn end_programmatic_change(&mut self, new_text: impl Into<String>) {
        self.programmatic = false;
        self.commit(new_text);
    }

    /// Whether snapshotting is currently suspended.
    pub fn is_programmatic(&self) -> bool {
        self.programmatic
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1 || self.has_pending()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn push_undo(&mut self, text: String) {
        self.undo_stack.push_back(text);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }
}
