//! Workspace - the set of open editor views and which one is active

use super::editor::EditorState;
use crate::editor::{EditorView, ViewId};

/// Open views in tab order plus the active one
#[derive(Default)]
pub struct Workspace {
    views: Vec<EditorState>,
    active: usize,
    next_view_id: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace with a single view holding `text`
    pub fn with_text(text: &str) -> Self {
        let mut workspace = Self::new();
        workspace.open(text);
        workspace
    }

    /// Open a new view and make it active
    pub fn open(&mut self, text: &str) -> ViewId {
        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;
        self.views.push(EditorState::new(id, text));
        self.active = self.views.len() - 1;
        id
    }

    /// Activate the view at `index`. Returns its id if the active view changed.
    pub fn activate(&mut self, index: usize) -> Option<ViewId> {
        if index >= self.views.len() || index == self.active {
            return None;
        }
        self.active = index;
        Some(self.views[index].id())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_view(&self) -> Option<&EditorState> {
        self.views.get(self.active)
    }

    pub fn active_view_mut(&mut self) -> Option<&mut EditorState> {
        self.views.get_mut(self.active)
    }

    pub fn view(&self, id: ViewId) -> Option<&EditorState> {
        self.views.iter().find(|v| v.id() == id)
    }

    pub fn views(&self) -> impl Iterator<Item = &EditorState> {
        self.views.iter()
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut EditorState> {
        self.views.iter_mut()
    }
}
