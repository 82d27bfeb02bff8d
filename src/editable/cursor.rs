//! Cursor and position types.

use super::selection::Selection;

/// A position in the text buffer (line and column, both 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Stable identity of a cursor within one editor view.
///
/// Ids are never reused while the view is alive, so they can key per-cursor
/// bookkeeping that outlives individual edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorId(pub u64);

/// A cursor: identity plus its selection (head is the caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub id: CursorId,
    pub selection: Selection,
}

impl Cursor {
    pub const fn new(id: CursorId, selection: Selection) -> Self {
        Self { id, selection }
    }

    /// Caret offset (selection head)
    pub const fn offset(&self) -> usize {
        self.selection.head
    }
}
