//! Contract between the paste cycle and the host editor.
//!
//! The cycle only needs a handful of capabilities from a view: enumerate
//! cursors, insert or replace text at a cursor, track a range across later
//! edits, manage undo checkpoints and report buffer/selection changes.
//! Resources the editor hands out ([`RangeTracker`]s and [`Subscription`]s)
//! are released when dropped.

use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

pub use crate::editable::{CheckpointId, CursorId};
use crate::history::PasteMetadata;

/// Identity of an editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub u64);

/// How to scroll when revealing the cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollRevealMode {
    /// Minimal scroll: move viewport just enough to bring cursor into safe zone
    #[default]
    Minimal,
    /// Centered: place cursor in the middle of the viewport
    Centered,
}

/// Options for inserting pasted text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// Leave the inserted text selected instead of placing the caret after it
    pub select: bool,
    /// Re-indent continuation lines to the insertion line's indentation
    pub auto_indent: bool,
}

/// Notification kinds a view can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BufferChanged,
    SelectionChanged,
}

/// A change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    BufferChanged { view: ViewId },
    SelectionChanged { view: ViewId, cursor: CursorId },
}

impl EditorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EditorEvent::BufferChanged { .. } => EventKind::BufferChanged,
            EditorEvent::SelectionChanged { .. } => EventKind::SelectionChanged,
        }
    }
}

/// Callback invoked synchronously for each notification
pub type Listener = Box<dyn FnMut(&EditorEvent)>;

/// Handle to a registered listener. Dropping it cancels the listener.
///
/// Cancelling only flips a shared flag, so it is safe from inside a listener
/// callback while the view is dispatching.
#[derive(Debug)]
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    /// Pair a new subscription with the flag the view checks before dispatch
    pub fn pair() -> (Self, Rc<Cell<bool>>) {
        let active = Rc::new(Cell::new(true));
        (
            Self {
                active: Rc::clone(&active),
            },
            active,
        )
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// A range in a view's buffer that follows later edits.
///
/// Dropping the tracker releases it in the editor. `range` returns `None`
/// once the underlying range is gone (for example the buffer was closed).
pub trait RangeTracker {
    fn range(&self) -> Option<Range<usize>>;
}

/// The editor view capabilities the paste cycle drives.
pub trait EditorView {
    fn id(&self) -> ViewId;

    /// Cursor ids in buffer order
    fn cursors(&self) -> Vec<CursorId>;

    fn has_multiple_cursors(&self) -> bool {
        self.cursors().len() > 1
    }

    /// Current selection of a cursor, `None` if the cursor is gone
    fn selection_range(&self, cursor: CursorId) -> Option<Range<usize>>;

    /// Select `range` with `cursor`. Returns false if the cursor is gone.
    fn set_selection_range(&mut self, cursor: CursorId, range: Range<usize>) -> bool;

    /// Replace the cursor's selection with `text` and return the inserted range
    fn insert_at_selection(
        &mut self,
        cursor: CursorId,
        text: &str,
        options: InsertOptions,
    ) -> Option<Range<usize>>;

    /// Replace `range` with `text` on behalf of `cursor`, returning the
    /// inserted range
    fn replace_range(
        &mut self,
        cursor: CursorId,
        range: Range<usize>,
        text: &str,
        options: InsertOptions,
    ) -> Option<Range<usize>> {
        if !self.set_selection_range(cursor, range) {
            return None;
        }
        self.insert_at_selection(cursor, text, options)
    }

    /// The host's ordinary paste of `text` at every cursor
    fn paste_plain(&mut self, text: &str, metadata: &PasteMetadata, options: InsertOptions);

    /// Start tracking `range` across subsequent edits
    fn track_range(&mut self, range: Range<usize>) -> Box<dyn RangeTracker>;

    /// Highlight `range` briefly. The view owns the highlight and removes it
    /// on its own once `duration` has passed.
    fn flash_range(&mut self, range: Range<usize>, duration: Duration);

    fn scroll_to_cursor(&mut self, mode: ScrollRevealMode);

    fn create_checkpoint(&mut self) -> CheckpointId;

    /// Undo everything since `checkpoint` without recording redo
    fn revert_to_checkpoint(&mut self, checkpoint: CheckpointId) -> bool;

    /// Make everything since `checkpoint` a single undo step
    fn group_changes_since_checkpoint(&mut self, checkpoint: CheckpointId) -> bool;

    /// Register a listener for one kind of notification
    fn subscribe(&mut self, kind: EventKind, listener: Listener) -> Subscription;
}
