//! Bounded, deduplicated ring of clipboard entries with a browse index.

use std::collections::VecDeque;

use super::entry::{Entry, PasteMetadata};

/// Default number of entries remembered
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Direction of a cycle step through history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasteDirection {
    /// Towards older entries (+1)
    Older,
    /// Towards newer entries (-1)
    Newer,
}

impl PasteDirection {
    pub const fn step(self) -> isize {
        match self {
            PasteDirection::Older => 1,
            PasteDirection::Newer => -1,
        }
    }
}

/// Clipboard history, most recent first.
///
/// `browse_index` is `None` ("unset") outside of a cycle. Whenever it is set
/// it is a valid index for the current length: every mutation that can
/// change the length either resets or re-clamps it.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<Entry>,
    max: usize,
    browse_index: Option<usize>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_max(DEFAULT_MAX_ENTRIES)
    }

    /// Create a store holding at most `max` entries (at least 1)
    pub fn with_max(max: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max: max.max(1),
            browse_index: None,
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Change capacity, evicting the oldest entries that no longer fit
    pub fn set_max(&mut self, max: usize) {
        self.max = max.max(1);
        if self.entries.len() > self.max {
            self.entries.truncate(self.max);
            if self.browse_index.is_some_and(|i| i >= self.entries.len()) {
                self.browse_index = Some(self.entries.len() - 1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn front(&self) -> Option<&Entry> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entry texts, most recent first
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(Entry::text).collect()
    }

    pub fn browse_index(&self) -> Option<usize> {
        self.browse_index
    }

    /// Record a clipboard payload. Returns whether the store changed.
    ///
    /// Empty text and a repeat of the current front are ignored. An equal
    /// entry further back is moved to the front instead of duplicated.
    pub fn add(&mut self, text: impl Into<String>, metadata: PasteMetadata) -> bool {
        let text = text.into();
        if text.is_empty() {
            return false;
        }
        if self
            .entries
            .front()
            .is_some_and(|front| front.matches(&text, &metadata))
        {
            return false;
        }

        if let Some(index) = self.entries.iter().position(|e| e.matches(&text, &metadata)) {
            self.entries.remove(index);
        }
        self.entries.push_front(Entry::new(text, metadata));
        self.entries.truncate(self.max);
        self.browse_index = None;
        true
    }

    /// Step the browse index and return the entry it lands on.
    ///
    /// An unset index is seeded just outside the ring on the side the step
    /// comes from, so the first OLDER step lands on index 0 and the first
    /// NEWER step on the last index. Stepping wraps in both directions.
    pub fn next_entry(&mut self, direction: PasteDirection) -> Option<&Entry> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let len = len as isize;
        let seed = match (self.browse_index, direction) {
            (Some(index), _) => index as isize,
            (None, PasteDirection::Older) => -1,
            (None, PasteDirection::Newer) => len,
        };
        let index = (seed + direction.step()).rem_euclid(len) as usize;
        self.browse_index = Some(index);
        self.entries.get(index)
    }

    /// Forget the browse position; entries are untouched
    pub fn reset_index(&mut self) {
        self.browse_index = None;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.browse_index = None;
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
