//! Selection type expressed in character offsets.

use std::ops::Range;

use super::history::{Assoc, EditOperation};

/// A text selection with anchor (start point) and head (cursor position).
/// The anchor stays fixed while the head moves during selection extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: usize,
    /// Where the cursor is (moving point)
    pub head: usize,
}

impl Selection {
    pub const fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub const fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Forward selection covering `range`
    pub fn from_range(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }

    /// Check if selection is empty (anchor == head)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the start offset (minimum of anchor and head)
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end offset (maximum of anchor and head)
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Selected character range
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Move both ends through an edit so the selection keeps pointing at the
    /// same text.
    pub fn map_through(&mut self, op: &EditOperation) {
        self.anchor = op.map_offset(self.anchor, Assoc::After);
        self.head = op.map_offset(self.head, Assoc::After);
    }

    /// Clamp both ends to a buffer of `len` characters
    pub fn clamp(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(5);
        assert!(sel.is_empty());
        assert_eq!(sel.range(), 5..5);
    }

    #[test]
    fn test_selection_start_end() {
        let forward = Selection::new(0, 5);
        assert_eq!(forward.range(), 0..5);

        let backward = Selection::new(5, 0);
        assert_eq!(backward.range(), 0..5);
        assert_eq!(backward.head, 0);
    }

    #[test]
    fn test_selection_maps_through_earlier_insert() {
        let mut sel = Selection::new(10, 14);
        sel.map_through(&EditOperation::insert(2, "abc".to_string()));
        assert_eq!(sel.range(), 13..17);
    }

    #[test]
    fn test_selection_unaffected_by_later_edit() {
        let mut sel = Selection::new(1, 3);
        sel.map_through(&EditOperation::delete(5, "xyz".to_string()));
        assert_eq!(sel.range(), 1..3);
    }
}
