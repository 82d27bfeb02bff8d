//! Marker layer: ranges that follow edits, handed out as RAII trackers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::editable::{Assoc, EditOperation};
use crate::editor::RangeTracker;

/// All live markers of one view, keyed by marker id.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    ranges: HashMap<u64, Range<usize>>,
    next_id: u64,
}

impl MarkerLayer {
    pub fn insert(&mut self, range: Range<usize>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.ranges.insert(id, range);
        id
    }

    pub fn get(&self, id: u64) -> Option<Range<usize>> {
        self.ranges.get(&id).cloned()
    }

    pub fn remove(&mut self, id: u64) {
        self.ranges.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Shift every marker through `op`. Markers do not grow when text is
    /// inserted exactly at one of their ends.
    pub fn map_through(&mut self, op: &EditOperation) {
        for range in self.ranges.values_mut() {
            let start = op.map_offset(range.start, Assoc::After);
            let end = op.map_offset(range.end, Assoc::Before);
            *range = start.min(end)..end;
        }
    }
}

/// Tracker handed to callers; removes its marker from the layer when dropped.
#[derive(Debug)]
pub struct Marker {
    layer: Weak<RefCell<MarkerLayer>>,
    id: u64,
}

impl Marker {
    pub fn create(layer: &Rc<RefCell<MarkerLayer>>, range: Range<usize>) -> Self {
        let id = layer.borrow_mut().insert(range);
        Self {
            layer: Rc::downgrade(layer),
            id,
        }
    }
}

impl RangeTracker for Marker {
    fn range(&self) -> Option<Range<usize>> {
        let layer = self.layer.upgrade()?;
        let markers = layer.try_borrow().ok()?;
        markers.get(self.id)
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if let Some(layer) = self.layer.upgrade() {
            if let Ok(mut markers) = layer.try_borrow_mut() {
                markers.remove(self.id);
            }
        }
    }
}

/// A transient highlight that disappears once its time runs out.
#[derive(Debug)]
pub struct Flash {
    marker: Marker,
    remaining: Duration,
}

impl Flash {
    pub fn new(marker: Marker, duration: Duration) -> Self {
        Self {
            marker,
            remaining: duration,
        }
    }

    pub fn range(&self) -> Option<Range<usize>> {
        self.marker.range()
    }

    /// Count down; returns false once expired
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        !self.remaining.is_zero()
    }
}
