//! Editor view state: cursors, markers, listeners and viewport over a document.
//!
//! `EditorState` is a complete in-memory [`EditorView`]. Every buffer or
//! selection change, whether it comes from the user or from a programmatic
//! caller, is reported synchronously to the registered listeners.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

use super::document::Document;
use super::markers::{Flash, Marker, MarkerLayer};
use crate::clipboard::ClipboardContent;
use crate::editable::{Cursor, CursorId, EditOperation, Position, Selection, TextBuffer};
use crate::editor::{
    CheckpointId, EditorEvent, EditorView, EventKind, InsertOptions, Listener, RangeTracker,
    ScrollRevealMode, Subscription, ViewId,
};
use crate::history::{PasteMetadata, SelectionClip};

/// Viewport state - what portion of the document is visible
#[derive(Debug, Clone)]
pub struct Viewport {
    /// First visible line (0-indexed)
    pub top_line: usize,
    /// First visible column (for horizontal scrolling)
    pub left_column: usize,
    /// Number of lines that fit in the viewport
    pub visible_lines: usize,
    /// Number of columns that fit in the viewport
    pub visible_columns: usize,
}

impl Viewport {
    pub fn new(visible_lines: usize, visible_columns: usize) -> Self {
        Self {
            top_line: 0,
            left_column: 0,
            visible_lines,
            visible_columns,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(25, 80)
    }
}

struct ListenerSlot {
    kind: EventKind,
    active: Rc<Cell<bool>>,
    callback: Listener,
}

/// One editor view over one document
pub struct EditorState {
    id: ViewId,
    document: Document,
    /// Always at least one cursor
    cursors: Vec<Cursor>,
    next_cursor_id: u64,
    markers: Rc<RefCell<MarkerLayer>>,
    listeners: Vec<ListenerSlot>,
    flashes: Vec<Flash>,
    pub viewport: Viewport,
    pub scroll_padding: usize,
}

impl EditorState {
    pub fn new(id: ViewId, text: &str) -> Self {
        Self::with_cursor(id, text, 0)
    }

    /// View with a single cursor at `offset`
    pub fn with_cursor(id: ViewId, text: &str, offset: usize) -> Self {
        let document = Document::with_text(text);
        let offset = offset.min(document.len_chars());
        Self {
            id,
            document,
            cursors: vec![Cursor::new(CursorId(0), Selection::collapsed(offset))],
            next_cursor_id: 1,
            markers: Rc::new(RefCell::new(MarkerLayer::default())),
            listeners: Vec::new(),
            flashes: Vec::new(),
            viewport: Viewport::default(),
            scroll_padding: 1,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> String {
        self.document.text()
    }

    /// The cursor used for scrolling: the first one in buffer order
    pub fn primary_cursor(&self) -> Cursor {
        self.cursors
            .iter()
            .min_by_key(|c| c.selection.start())
            .copied()
            .unwrap_or(Cursor::new(CursorId(0), Selection::default()))
    }

    /// Selections in buffer order
    pub fn selections(&self) -> Vec<Selection> {
        self.sorted_cursors().iter().map(|c| c.selection).collect()
    }

    /// Caret offsets in buffer order
    pub fn cursor_offsets(&self) -> Vec<usize> {
        self.sorted_cursors().iter().map(|c| c.offset()).collect()
    }

    /// Live markers, including the ones backing flashes
    pub fn marker_count(&self) -> usize {
        self.markers.borrow().len()
    }

    /// Listeners that have not been cancelled
    pub fn listener_count(&self) -> usize {
        self.listeners.iter().filter(|l| l.active.get()).count()
    }

    /// Ranges currently highlighted by a flash
    pub fn flash_ranges(&self) -> Vec<Range<usize>> {
        self.flashes.iter().filter_map(Flash::range).collect()
    }

    fn sorted_cursors(&self) -> Vec<Cursor> {
        let mut cursors = self.cursors.clone();
        cursors.sort_by_key(|c| (c.selection.start(), c.id));
        cursors
    }

    fn cursor_index(&self, id: CursorId) -> Option<usize> {
        self.cursors.iter().position(|c| c.id == id)
    }

    fn emit(&mut self, event: EditorEvent) {
        self.listeners.retain(|slot| slot.active.get());
        let kind = event.kind();
        for slot in self.listeners.iter_mut() {
            // A callback may cancel later slots while we dispatch
            if slot.kind == kind && slot.active.get() {
                (slot.callback)(&event);
            }
        }
    }

    fn emit_selection_changed(&mut self, cursor: CursorId) {
        self.emit(EditorEvent::SelectionChanged {
            view: self.id,
            cursor,
        });
    }

    /// Apply an edit, shift markers and cursors through it, notify listeners
    fn apply_edit(&mut self, range: Range<usize>, text: &str) -> Range<usize> {
        let op = self.document.replace(range, text);
        self.map_through(&op);
        self.emit(EditorEvent::BufferChanged { view: self.id });
        op.offset..op.offset + op.inserted_len()
    }

    fn map_through(&mut self, op: &EditOperation) {
        self.markers.borrow_mut().map_through(op);
        for cursor in &mut self.cursors {
            cursor.selection.map_through(op);
        }
    }

    /// Replay operations without recording them, then collapse to one cursor
    /// after the last change
    fn replay(&mut self, operations: Vec<EditOperation>) {
        let Some(last) = operations.last() else {
            return;
        };
        let caret = last.offset + last.inserted_len();
        for op in &operations {
            self.document.apply_unrecorded(op);
            self.map_through(op);
        }
        self.emit(EditorEvent::BufferChanged { view: self.id });
        self.collapse_to(caret);
    }

    fn collapse_to(&mut self, offset: usize) {
        let offset = offset.min(self.document.len_chars());
        let primary = self.primary_cursor().id;
        self.cursors = vec![Cursor::new(primary, Selection::collapsed(offset))];
        self.emit_selection_changed(primary);
    }

    fn indent_continuation_lines(&self, offset: usize, text: &str) -> String {
        let line = self.document.buffer.offset_to_position(offset).line;
        let indent = self.document.buffer.leading_whitespace(line);
        if indent.is_empty() || !text.contains('\n') {
            return text.to_string();
        }
        let mut result = String::with_capacity(text.len() + indent.len() * 4);
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                result.push('\n');
                if !part.is_empty() {
                    result.push_str(&indent);
                }
            }
            result.push_str(part);
        }
        result
    }

    fn indent_basis(&self, offset: usize) -> usize {
        let line = self.document.buffer.offset_to_position(offset).line;
        self.document.buffer.leading_whitespace(line).chars().count()
    }

    // === User actions ===

    /// Collapse to a single cursor at `offset`
    pub fn set_cursor(&mut self, offset: usize) {
        self.collapse_to(offset);
    }

    /// Select `range` with a single cursor
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.document.len_chars();
        let primary = self.primary_cursor().id;
        let mut selection = Selection::from_range(range);
        selection.clamp(len);
        self.cursors = vec![Cursor::new(primary, selection)];
        self.emit_selection_changed(primary);
    }

    /// Add a cursor at `offset`, or return the one already there
    pub fn add_cursor(&mut self, offset: usize) -> CursorId {
        let offset = offset.min(self.document.len_chars());
        if let Some(existing) = self
            .cursors
            .iter()
            .find(|c| c.selection.is_empty() && c.offset() == offset)
        {
            return existing.id;
        }
        let id = CursorId(self.next_cursor_id);
        self.next_cursor_id += 1;
        self.cursors
            .push(Cursor::new(id, Selection::collapsed(offset)));
        self.emit_selection_changed(id);
        id
    }

    /// Type `text` at every cursor, replacing selections
    pub fn type_text(&mut self, text: &str) {
        for id in EditorView::cursors(self) {
            self.insert_at_selection(id, text, InsertOptions::default());
        }
    }

    pub fn undo(&mut self) -> bool {
        let Some(transaction) = self.document.history.pop_undo() else {
            return false;
        };
        self.replay(transaction.inverse_operations());
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(transaction) = self.document.history.pop_redo() else {
            return false;
        };
        self.replay(transaction.operations);
        true
    }

    /// Clipboard payload for the current selections.
    ///
    /// Several non-empty selections become one payload: the clips joined by
    /// newlines, with the per-cursor clips in the metadata. With nothing
    /// selected the primary cursor's whole line is copied.
    pub fn copy(&self) -> Option<ClipboardContent> {
        let clips: Vec<SelectionClip> = self
            .sorted_cursors()
            .iter()
            .filter(|c| !c.selection.is_empty())
            .map(|c| SelectionClip {
                text: self.document.buffer.slice(c.selection.range()),
                indent_basis: self.indent_basis(c.selection.start()),
                full_line: false,
            })
            .collect();

        match clips.len() {
            0 => {
                let range = self.primary_line_range()?;
                let text = self.document.buffer.slice(range.clone());
                let metadata = PasteMetadata {
                    indent_basis: Some(self.indent_basis(range.start)),
                    full_line: true,
                    selections: None,
                };
                Some(ClipboardContent::new(text, metadata))
            }
            1 => {
                let clip = &clips[0];
                let metadata = PasteMetadata {
                    indent_basis: Some(clip.indent_basis),
                    full_line: false,
                    selections: None,
                };
                Some(ClipboardContent::new(clip.text.clone(), metadata))
            }
            _ => {
                let text = clips
                    .iter()
                    .map(|c| c.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                Some(ClipboardContent::new(text, PasteMetadata::from_clips(clips)))
            }
        }
    }

    /// Copy, then delete what was copied
    pub fn cut(&mut self) -> Option<ClipboardContent> {
        let content = self.copy()?;
        if content.metadata.full_line {
            if let Some(range) = self.primary_line_range() {
                self.apply_edit(range.clone(), "");
                self.collapse_to(range.start);
            }
        } else {
            for id in EditorView::cursors(self) {
                if let Some(index) = self.cursor_index(id) {
                    if !self.cursors[index].selection.is_empty() {
                        self.insert_at_selection(id, "", InsertOptions::default());
                    }
                }
            }
        }
        Some(content)
    }

    /// Full line of the primary cursor including its newline, if any text
    fn primary_line_range(&self) -> Option<Range<usize>> {
        if self.document.buffer.is_empty() {
            return None;
        }
        let buffer = &self.document.buffer;
        let line = buffer.offset_to_position(self.primary_cursor().offset()).line;
        let start = buffer.position_to_offset(Position::new(line, 0));
        let end = if line + 1 < buffer.line_count() {
            buffer.position_to_offset(Position::new(line + 1, 0))
        } else {
            buffer.len_chars()
        };
        Some(start..end)
    }

    /// Drop the whole marker layer without notifying anyone. Trackers handed
    /// out earlier report no range from now on.
    pub fn destroy_markers(&mut self) {
        self.flashes.clear();
        self.markers = Rc::new(RefCell::new(MarkerLayer::default()));
    }

    /// Let time pass for transient highlights
    pub fn advance_clock(&mut self, elapsed: Duration) {
        self.flashes.retain_mut(|flash| flash.tick(elapsed));
    }

    /// Buffer text with cursors drawn in: `|` for a caret, `[`..`]` around
    /// a selection
    pub fn render(&self) -> String {
        let mut marks: Vec<(usize, u8, char)> = Vec::new();
        for selection in self.selections() {
            if selection.is_empty() {
                marks.push((selection.head, 1, '|'));
            } else {
                marks.push((selection.start(), 2, '['));
                marks.push((selection.end(), 0, ']'));
            }
        }
        marks.sort();

        let text = self.text();
        let mut out = String::with_capacity(text.len() + marks.len());
        let mut pending = marks.into_iter().peekable();
        for (offset, ch) in text.chars().enumerate() {
            while let Some((_, _, mark)) = pending.next_if(|(at, _, _)| *at <= offset) {
                out.push(mark);
            }
            out.push(ch);
        }
        for (_, _, mark) in pending {
            out.push(mark);
        }
        out
    }

    /// Ensure the primary cursor is visible using the specified reveal strategy
    fn ensure_cursor_visible_with_mode(&mut self, mode: ScrollRevealMode) {
        let cursor = self
            .document
            .buffer
            .offset_to_position(self.primary_cursor().offset());
        let padding = self.scroll_padding;
        let total_lines = self.document.buffer.line_count();

        // Vertical scrolling
        if total_lines > self.viewport.visible_lines && self.viewport.visible_lines > 0 {
            let max_top = total_lines.saturating_sub(self.viewport.visible_lines);
            let safe_top = self.viewport.top_line + padding;
            let safe_bottom = self.viewport.top_line
                + self
                    .viewport
                    .visible_lines
                    .saturating_sub(padding)
                    .saturating_sub(1);

            let line = cursor.line;
            let off_above = line < safe_top;
            let off_below = line > safe_bottom;

            if off_above || off_below {
                self.viewport.top_line = match mode {
                    ScrollRevealMode::Minimal => {
                        if off_above {
                            line.saturating_sub(padding)
                        } else {
                            (line + padding + 1).saturating_sub(self.viewport.visible_lines)
                        }
                    }
                    ScrollRevealMode::Centered => {
                        line.saturating_sub(self.viewport.visible_lines / 2)
                    }
                }
                .min(max_top);
            }
        } else {
            self.viewport.top_line = 0;
        }

        // Horizontal scrolling
        const HORIZONTAL_MARGIN: usize = 4;
        let left_safe = self.viewport.left_column.saturating_add(HORIZONTAL_MARGIN);
        let right_safe = self
            .viewport
            .left_column
            .saturating_add(self.viewport.visible_columns)
            .saturating_sub(HORIZONTAL_MARGIN);

        if cursor.column < left_safe {
            self.viewport.left_column = cursor.column.saturating_sub(HORIZONTAL_MARGIN);
        } else if cursor.column >= right_safe {
            self.viewport.left_column = cursor
                .column
                .saturating_add(HORIZONTAL_MARGIN)
                .saturating_add(1)
                .saturating_sub(self.viewport.visible_columns);
        }
    }
}

impl EditorView for EditorState {
    fn id(&self) -> ViewId {
        self.id
    }

    fn cursors(&self) -> Vec<CursorId> {
        self.sorted_cursors().iter().map(|c| c.id).collect()
    }

    fn has_multiple_cursors(&self) -> bool {
        self.cursors.len() > 1
    }

    fn selection_range(&self, cursor: CursorId) -> Option<Range<usize>> {
        let index = self.cursor_index(cursor)?;
        Some(self.cursors[index].selection.range())
    }

    fn set_selection_range(&mut self, cursor: CursorId, range: Range<usize>) -> bool {
        let Some(index) = self.cursor_index(cursor) else {
            return false;
        };
        let mut selection = Selection::from_range(range);
        selection.clamp(self.document.len_chars());
        self.cursors[index].selection = selection;
        self.emit_selection_changed(cursor);
        true
    }

    fn insert_at_selection(
        &mut self,
        cursor: CursorId,
        text: &str,
        options: InsertOptions,
    ) -> Option<Range<usize>> {
        let index = self.cursor_index(cursor)?;
        let range = self.cursors[index].selection.range();
        let text = if options.auto_indent {
            self.indent_continuation_lines(range.start, text)
        } else {
            text.to_string()
        };

        let inserted = self.apply_edit(range, &text);
        self.cursors[index].selection = if options.select {
            Selection::from_range(inserted.clone())
        } else {
            Selection::collapsed(inserted.end)
        };
        self.emit_selection_changed(cursor);
        Some(inserted)
    }

    fn paste_plain(&mut self, text: &str, metadata: &PasteMetadata, options: InsertOptions) {
        let ids = EditorView::cursors(self);
        // One clip per cursor when the copy came from as many cursors
        let clips = metadata
            .selections
            .as_ref()
            .filter(|clips| ids.len() > 1 && clips.len() == ids.len());
        for (i, id) in ids.into_iter().enumerate() {
            let text = clips.map_or(text, |clips| clips[i].text.as_str());
            self.insert_at_selection(id, text, options);
        }
    }

    fn track_range(&mut self, range: Range<usize>) -> Box<dyn RangeTracker> {
        Box::new(Marker::create(&self.markers, range))
    }

    fn flash_range(&mut self, range: Range<usize>, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let marker = Marker::create(&self.markers, range);
        self.flashes.push(Flash::new(marker, duration));
    }

    fn scroll_to_cursor(&mut self, mode: ScrollRevealMode) {
        self.ensure_cursor_visible_with_mode(mode);
    }

    fn create_checkpoint(&mut self) -> CheckpointId {
        self.document.history.create_checkpoint()
    }

    fn revert_to_checkpoint(&mut self, checkpoint: CheckpointId) -> bool {
        let Some(reverted) = self.document.history.revert_to(checkpoint) else {
            return false;
        };
        let operations = reverted
            .iter()
            .rev()
            .flat_map(|t| t.inverse_operations())
            .collect();
        self.replay(operations);
        true
    }

    fn group_changes_since_checkpoint(&mut self, checkpoint: CheckpointId) -> bool {
        self.document.history.group_changes_since(checkpoint)
    }

    fn subscribe(&mut self, kind: EventKind, listener: Listener) -> Subscription {
        let (subscription, active) = Subscription::pair();
        self.listeners.push(ListenerSlot {
            kind,
            active,
            callback: listener,
        });
        subscription
    }
}
