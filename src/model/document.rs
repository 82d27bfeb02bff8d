//! Document model - the text buffer plus its undo history

use std::ops::Range;

use crate::editable::{EditHistory, EditOperation, RopeBuffer, TextBuffer, TextBufferMut};

/// Buffer contents and edit history of one view
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub buffer: RopeBuffer,
    pub history: EditHistory,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: RopeBuffer::from_text(text),
            history: EditHistory::new(),
        }
    }

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Replace `range` with `text`, record it for undo and return the
    /// applied operation
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> EditOperation {
        let range = self.buffer.clamp_range(range);
        let deleted = self.buffer.slice(range.clone());
        self.buffer.replace(range.clone(), text);
        let op = EditOperation::replace(range.start, deleted, text.to_string());
        self.history.push(op.clone());
        op
    }

    /// Apply an operation without recording it (undo/redo replay)
    pub fn apply_unrecorded(&mut self, op: &EditOperation) {
        let end = op.offset + op.deleted_len();
        self.buffer.replace(op.offset..end, &op.inserted_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_records_history() {
        let mut doc = Document::with_text("hello world");
        let op = doc.replace(6..11, "there");
        assert_eq!(doc.text(), "hello there");
        assert_eq!(op.deleted_text, "world");
        assert_eq!(doc.history.undo_count(), 1);
    }

    #[test]
    fn test_inverse_replay_restores_text() {
        let mut doc = Document::with_text("abc");
        let op = doc.replace(1..2, "XYZ");
        doc.apply_unrecorded(&op.inverse());
        assert_eq!(doc.text(), "abc");
    }
}
