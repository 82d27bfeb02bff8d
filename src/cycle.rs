//! Paste cycle controller
//!
//! `PasteCycle` wraps the clipboard, records every write into a
//! [`HistoryStore`] and drives cycle pastes in an editor view. Repeated paste
//! commands replace the text inserted by the previous step instead of
//! inserting again, stepping through history. Any edit, selection change,
//! clipboard write or view switch that the controller did not cause itself
//! ends the cycle.
//!
//! State shared with the view's listeners lives in [`CycleState`] behind an
//! `Rc`. Listeners only hold a `Weak` to it, so a controller that has been
//! stopped never receives notifications.

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::rc::{Rc, Weak};

use anyhow::Result;

use crate::clipboard::{Clipboard, ClipboardContent};
use crate::config::PasteCycleConfig;
use crate::editor::{
    CheckpointId, CursorId, EditorEvent, EditorView, EventKind, InsertOptions, RangeTracker,
    ScrollRevealMode, Subscription, ViewId,
};
use crate::history::{Entry, HistoryStore, PasteDirection, PasteMetadata};

/// What a paste command ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Delegated to the host's ordinary paste
    NormalPaste,
    /// History was empty; the buffer is unchanged
    NothingToPaste,
    /// A cycle step inserted this entry
    Pasted(Entry),
}

/// Why a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    ClipboardWrite,
    BufferEdited,
    SelectionChanged,
    ActiveViewChanged,
    Cleared,
    PasteLast,
    Stopped,
    Requested,
}

impl fmt::Display for InvalidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InvalidationReason::ClipboardWrite => "clipboard write",
            InvalidationReason::BufferEdited => "buffer edited",
            InvalidationReason::SelectionChanged => "selection changed",
            InvalidationReason::ActiveViewChanged => "active view changed",
            InvalidationReason::Cleared => "history cleared",
            InvalidationReason::PasteLast => "paste-last",
            InvalidationReason::Stopped => "controller stopped",
            InvalidationReason::Requested => "requested",
        };
        f.write_str(reason)
    }
}

/// Replace targets of the active cycle, one per cursor.
///
/// Tracking a new range for a cursor releases the previous tracker first.
#[derive(Default)]
pub struct TrackedRegions {
    trackers: HashMap<CursorId, Box<dyn RangeTracker>>,
}

impl TrackedRegions {
    pub fn track(&mut self, cursor: CursorId, tracker: Box<dyn RangeTracker>) {
        drop(self.trackers.remove(&cursor));
        self.trackers.insert(cursor, tracker);
    }

    /// Current range for `cursor`; `None` if untracked or stale
    pub fn range(&self, cursor: CursorId) -> Option<Range<usize>> {
        self.trackers.get(&cursor)?.range()
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Release every tracker and return how many there were
    pub fn release_all(&mut self) -> usize {
        let released = self.trackers.len();
        self.trackers.clear();
        released
    }
}

impl fmt::Debug for TrackedRegions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursors: Vec<_> = self.trackers.keys().collect();
        cursors.sort();
        f.debug_struct("TrackedRegions")
            .field("cursors", &cursors)
            .finish()
    }
}

/// Listener registrations held while a cycle is active, cancelled together
#[derive(Debug, Default)]
pub struct Subscriptions(Vec<Subscription>);

impl Subscriptions {
    pub fn add(&mut self, subscription: Subscription) {
        self.0.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cancel_all(&mut self) {
        self.0.clear();
    }
}

/// Bookkeeping of a running cycle in one view
#[derive(Debug)]
struct ActiveCycle {
    view: ViewId,
    checkpoint: CheckpointId,
    regions: TrackedRegions,
    subscriptions: Subscriptions,
}

impl ActiveCycle {
    fn release(mut self) -> usize {
        self.subscriptions.cancel_all();
        self.regions.release_all()
    }
}

/// State reachable from the view's listeners
#[derive(Debug)]
pub struct CycleState {
    pasting: Cell<bool>,
    history: RefCell<HistoryStore>,
    active: RefCell<Option<ActiveCycle>>,
}

impl CycleState {
    fn new(max: usize) -> Self {
        Self {
            pasting: Cell::new(false),
            history: RefCell::new(HistoryStore::with_max(max)),
            active: RefCell::new(None),
        }
    }

    fn on_editor_event(&self, event: &EditorEvent) {
        if self.pasting.get() {
            tracing::trace!(?event, "ignoring notification raised by paste step");
            return;
        }
        let reason = match event {
            EditorEvent::BufferChanged { .. } => InvalidationReason::BufferEdited,
            EditorEvent::SelectionChanged { .. } => InvalidationReason::SelectionChanged,
        };
        self.invalidate(reason);
    }

    /// End the active cycle, if any, and reset the browse index.
    /// Returns whether a cycle was running.
    ///
    /// Neither cell may be borrowed across a call into the editor, so both
    /// borrows here always succeed.
    fn invalidate(&self, reason: InvalidationReason) -> bool {
        let cycle = self.active.borrow_mut().take();
        self.history.borrow_mut().reset_index();

        let Some(cycle) = cycle else {
            return false;
        };
        let view = cycle.view;
        let released = cycle.release();
        tracing::debug!(%reason, ?view, released, "paste cycle invalidated");
        true
    }
}

/// Sets the pasting flag for the duration of one paste step
struct CycleGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> CycleGuard<'a> {
    fn new(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Clipboard history with an in-place paste cycle.
///
/// Constructed with [`PasteCycle::start`], which takes ownership of the real
/// clipboard; hosts route their clipboard writes through
/// [`PasteCycle::on_clipboard_write`]. [`PasteCycle::stop`] ends any cycle and
/// hands the clipboard back.
pub struct PasteCycle<C: Clipboard> {
    clipboard: C,
    config: PasteCycleConfig,
    state: Rc<CycleState>,
    last_pasted: Option<Entry>,
}

impl<C: Clipboard> PasteCycle<C> {
    pub fn start(clipboard: C, config: PasteCycleConfig) -> Self {
        tracing::debug!(max = config.capacity(), "paste cycle started");
        Self {
            clipboard,
            state: Rc::new(CycleState::new(config.capacity())),
            config,
            last_pasted: None,
        }
    }

    /// End any cycle and give the wrapped clipboard back
    pub fn stop(self) -> C {
        self.state.invalidate(InvalidationReason::Stopped);
        tracing::debug!("paste cycle stopped");
        self.clipboard
    }

    pub fn config(&self) -> &PasteCycleConfig {
        &self.config
    }

    /// Apply new options. A lower `max` truncates history right away.
    pub fn set_config(&mut self, config: PasteCycleConfig) {
        self.state.history.borrow_mut().set_max(config.capacity());
        self.config = config;
    }

    pub fn history(&self) -> Ref<'_, HistoryStore> {
        self.state.history.borrow()
    }

    /// Entry inserted by the most recent cycle step
    pub fn last_pasted(&self) -> Option<&Entry> {
        self.last_pasted.as_ref()
    }

    pub fn is_cycle_active(&self) -> bool {
        self.state.active.borrow().is_some()
    }

    /// View the active cycle belongs to
    pub fn active_view(&self) -> Option<ViewId> {
        self.state.active.borrow().as_ref().map(|c| c.view)
    }

    /// Replace target of `cursor` in the active cycle
    pub fn tracked_region(&self, cursor: CursorId) -> Option<Range<usize>> {
        self.state.active.borrow().as_ref()?.regions.range(cursor)
    }

    pub fn tracked_region_count(&self) -> usize {
        self.state
            .active
            .borrow()
            .as_ref()
            .map_or(0, |c| c.regions.len())
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Read the wrapped clipboard
    pub fn read(&mut self) -> Result<ClipboardContent> {
        self.clipboard.read()
    }

    /// Write through to the clipboard, then record the text in history and
    /// end any cycle. A failed write leaves history untouched.
    pub fn on_clipboard_write(&mut self, text: &str, metadata: PasteMetadata) -> Result<()> {
        self.clipboard.write(text, &metadata)?;
        self.state.history.borrow_mut().add(text, metadata);
        self.state.invalidate(InvalidationReason::ClipboardWrite);
        Ok(())
    }

    /// Paste the next entry in `direction`, replacing the previous step's
    /// text when a cycle is already running in this view.
    pub fn paste<E>(&mut self, editor: &mut E, direction: PasteDirection) -> Result<PasteOutcome>
    where
        E: EditorView + ?Sized,
    {
        if editor.has_multiple_cursors() && self.config.normal_paste_with_multiple_cursors {
            let content = self.clipboard.read()?;
            editor.paste_plain(&content.text, &content.metadata, self.insert_options());
            return Ok(PasteOutcome::NormalPaste);
        }

        if self.active_view().is_some_and(|view| view != editor.id()) {
            self.state.invalidate(InvalidationReason::ActiveViewChanged);
        }

        if !self.is_cycle_active() {
            // The clipboard may have changed outside our view of it
            let content = self.clipboard.read()?;
            self.state
                .history
                .borrow_mut()
                .add(content.text, content.metadata);
            if self.state.history.borrow().is_empty() {
                return Ok(PasteOutcome::NothingToPaste);
            }
            self.enter_cycle(editor);
        }

        let Some(entry) = self
            .state
            .history
            .borrow_mut()
            .next_entry(direction)
            .cloned()
        else {
            return Ok(PasteOutcome::NothingToPaste);
        };

        let Some(mut cycle) = self.state.active.borrow_mut().take() else {
            return Ok(PasteOutcome::NothingToPaste);
        };

        {
            let _guard = CycleGuard::new(&self.state.pasting);
            let options = self.insert_options();
            for cursor in editor.cursors() {
                let inserted = match cycle.regions.range(cursor) {
                    Some(region) => editor.replace_range(cursor, region, entry.text(), options),
                    None => editor.insert_at_selection(cursor, entry.text(), options),
                };
                let Some(inserted) = inserted else {
                    tracing::debug!(?cursor, "cursor vanished during paste step");
                    continue;
                };
                cycle.regions.track(cursor, editor.track_range(inserted.clone()));
                if self.config.flash_on_paste {
                    editor.flash_range(inserted, self.config.flash_duration());
                }
            }
            editor.scroll_to_cursor(ScrollRevealMode::Minimal);
        }

        if !editor.group_changes_since_checkpoint(cycle.checkpoint) {
            tracing::debug!("undo checkpoint no longer available, step not grouped");
        }

        *self.state.active.borrow_mut() = Some(cycle);
        self.last_pasted = Some(entry.clone());
        tracing::debug!(?direction, text_len = entry.text().len(), "paste cycle step");
        Ok(PasteOutcome::Pasted(entry))
    }

    /// Leave any cycle and do a plain paste of the last pasted entry, or of
    /// the clipboard if nothing was pasted yet. Never flashes.
    pub fn paste_last<E>(&mut self, editor: &mut E) -> Result<PasteOutcome>
    where
        E: EditorView + ?Sized,
    {
        self.state.invalidate(InvalidationReason::PasteLast);

        let (text, metadata) = match &self.last_pasted {
            Some(entry) => (entry.text().to_string(), entry.metadata().clone()),
            None => {
                let content = self.clipboard.read()?;
                (content.text, content.metadata)
            }
        };
        if text.is_empty() {
            return Ok(PasteOutcome::NothingToPaste);
        }

        let _guard = CycleGuard::new(&self.state.pasting);
        editor.paste_plain(&text, &metadata, self.insert_options());
        editor.scroll_to_cursor(ScrollRevealMode::Minimal);
        Ok(PasteOutcome::NormalPaste)
    }

    /// Forget all history and end any cycle
    pub fn clear(&mut self) {
        self.state.history.borrow_mut().clear();
        self.last_pasted = None;
        self.state.invalidate(InvalidationReason::Cleared);
    }

    /// End the active cycle. Safe to call when none is running.
    pub fn invalidate_cycle(&mut self) -> bool {
        self.state.invalidate(InvalidationReason::Requested)
    }

    /// The host switched to `view`; a cycle never survives the switch
    pub fn on_active_view_changed(&mut self, view: ViewId) {
        if self.state.invalidate(InvalidationReason::ActiveViewChanged) {
            tracing::trace!(?view, "cycle ended by view switch");
        }
    }

    fn enter_cycle<E>(&mut self, editor: &mut E)
    where
        E: EditorView + ?Sized,
    {
        let checkpoint = editor.create_checkpoint();
        let mut subscriptions = Subscriptions::default();
        for kind in [EventKind::BufferChanged, EventKind::SelectionChanged] {
            let state: Weak<CycleState> = Rc::downgrade(&self.state);
            subscriptions.add(editor.subscribe(
                kind,
                Box::new(move |event| {
                    if let Some(state) = state.upgrade() {
                        state.on_editor_event(event);
                    }
                }),
            ));
        }

        let view = editor.id();
        *self.state.active.borrow_mut() = Some(ActiveCycle {
            view,
            checkpoint,
            regions: TrackedRegions::default(),
            subscriptions,
        });
        tracing::debug!(?view, "entered paste cycle");
    }

    fn insert_options(&self) -> InsertOptions {
        InsertOptions {
            select: self.config.select_pasted,
            auto_indent: self.config.auto_indent_on_paste,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::model::EditorState;

    struct CountedTracker {
        range: Range<usize>,
        live: Rc<Cell<usize>>,
    }

    impl CountedTracker {
        fn boxed(range: Range<usize>, live: &Rc<Cell<usize>>) -> Box<dyn RangeTracker> {
            live.set(live.get() + 1);
            Box::new(Self {
                range,
                live: Rc::clone(live),
            })
        }
    }

    impl RangeTracker for CountedTracker {
        fn range(&self) -> Option<Range<usize>> {
            Some(self.range.clone())
        }
    }

    impl Drop for CountedTracker {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn controller(history: &[&str]) -> PasteCycle<MemoryClipboard> {
        let mut cycle = PasteCycle::start(MemoryClipboard::new(), PasteCycleConfig::default());
        for text in history {
            cycle
                .on_clipboard_write(text, PasteMetadata::default())
                .unwrap();
        }
        cycle
    }

    #[test]
    fn test_tracking_releases_previous_tracker() {
        let live = Rc::new(Cell::new(0));
        let mut regions = TrackedRegions::default();
        regions.track(CursorId(0), CountedTracker::boxed(0..1, &live));
        regions.track(CursorId(0), CountedTracker::boxed(0..2, &live));
        regions.track(CursorId(1), CountedTracker::boxed(3..4, &live));
        assert_eq!(live.get(), 2);
        assert_eq!(regions.range(CursorId(0)), Some(0..2));

        assert_eq!(regions.release_all(), 2);
        assert_eq!(live.get(), 0);
        assert!(regions.is_empty());
    }

    #[test]
    fn test_guard_clears_flag_on_scope_exit() {
        let flag = Cell::new(false);
        {
            let _guard = CycleGuard::new(&flag);
            assert!(flag.get());
        }
        assert!(!flag.get());
    }

    #[test]
    fn test_first_paste_enters_cycle() {
        let mut cycle = controller(&["a", "b"]);
        let mut editor = EditorState::new(ViewId(1), "");

        let outcome = cycle.paste(&mut editor, PasteDirection::Older).unwrap();
        assert_eq!(outcome, PasteOutcome::Pasted(Entry::new("b", PasteMetadata::default())));
        assert!(cycle.is_cycle_active());
        assert_eq!(cycle.active_view(), Some(ViewId(1)));
        assert_eq!(cycle.tracked_region_count(), 1);
        assert_eq!(editor.text(), "b");
    }

    #[test]
    fn test_second_step_replaces_previous_text() {
        let mut cycle = controller(&["a", "b"]);
        let mut editor = EditorState::new(ViewId(1), "x ");
        editor.set_cursor(2);

        cycle.paste(&mut editor, PasteDirection::Older).unwrap();
        cycle.paste(&mut editor, PasteDirection::Older).unwrap();
        assert_eq!(editor.text(), "x a");
        assert!(cycle.is_cycle_active());
        assert_eq!(cycle.tracked_region(CursorId(0)), Some(2..3));
    }

    #[test]
    fn test_user_edit_invalidates() {
        let mut cycle = controller(&["a"]);
        let mut editor = EditorState::new(ViewId(1), "");
        cycle.paste(&mut editor, PasteDirection::Older).unwrap();
        let markers = editor.marker_count();

        editor.type_text("!");
        assert!(!cycle.is_cycle_active());
        assert_eq!(cycle.history().browse_index(), None);
        assert!(editor.marker_count() < markers);
        assert_eq!(editor.listener_count(), 0);
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut cycle = controller(&[]);
        let mut editor = EditorState::new(ViewId(1), "abc");
        let outcome = cycle.paste(&mut editor, PasteDirection::Older).unwrap();
        assert_eq!(outcome, PasteOutcome::NothingToPaste);
        assert!(!cycle.is_cycle_active());
        assert_eq!(editor.text(), "abc");
        assert!(!cycle.state.pasting.get());
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let mut cycle = controller(&["a"]);
        let mut editor = EditorState::new(ViewId(1), "");
        cycle.paste(&mut editor, PasteDirection::Older).unwrap();
        assert!(cycle.invalidate_cycle());
        assert!(!cycle.invalidate_cycle());
    }

    #[test]
    fn test_stop_returns_clipboard_and_releases() {
        let mut cycle = controller(&["a"]);
        let mut editor = EditorState::new(ViewId(1), "");
        cycle.paste(&mut editor, PasteDirection::Older).unwrap();
        let clipboard = cycle.stop();
        assert_eq!(clipboard.contents().text, "a");
        assert_eq!(editor.listener_count(), 0);
    }

    #[test]
    fn test_editor_event_invalidation_is_total() {
        let live = Rc::new(Cell::new(0));
        let state = CycleState::new(5);
        state.history.borrow_mut().add("a", PasteMetadata::default());
        state.history.borrow_mut().next_entry(PasteDirection::Older);

        let mut regions = TrackedRegions::default();
        regions.track(CursorId(0), CountedTracker::boxed(0..1, &live));
        regions.track(CursorId(1), CountedTracker::boxed(2..3, &live));
        let (subscription, listening) = Subscription::pair();
        let mut subscriptions = Subscriptions::default();
        subscriptions.add(subscription);
        *state.active.borrow_mut() = Some(ActiveCycle {
            view: ViewId(1),
            checkpoint: CheckpointId(1),
            regions,
            subscriptions,
        });

        state.on_editor_event(&EditorEvent::BufferChanged { view: ViewId(1) });

        assert!(state.active.borrow().is_none());
        assert_eq!(state.history.borrow().browse_index(), None);
        assert_eq!(live.get(), 0);
        assert!(!listening.get());
    }

    #[test]
    fn test_editor_event_ignored_while_pasting() {
        let state = CycleState::new(5);
        state.history.borrow_mut().add("a", PasteMetadata::default());
        state.history.borrow_mut().next_entry(PasteDirection::Older);
        *state.active.borrow_mut() = Some(ActiveCycle {
            view: ViewId(1),
            checkpoint: CheckpointId(1),
            regions: TrackedRegions::default(),
            subscriptions: Subscriptions::default(),
        });

        {
            let _guard = CycleGuard::new(&state.pasting);
            state.on_editor_event(&EditorEvent::SelectionChanged {
                view: ViewId(1),
                cursor: CursorId(0),
            });
        }
        assert!(state.active.borrow().is_some());
        assert_eq!(state.history.borrow().browse_index(), Some(0));
    }

    #[test]
    fn test_invalidation_reason_display() {
        assert_eq!(InvalidationReason::BufferEdited.to_string(), "buffer edited");
        assert_eq!(InvalidationReason::PasteLast.to_string(), "paste-last");
    }
}
