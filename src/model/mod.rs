//! Application model - the in-memory editor the paste cycle runs against
//!
//! This module contains the state types following the Elm Architecture pattern.

pub mod document;
pub mod editor;
pub mod markers;
pub mod workspace;

pub use document::Document;
pub use editor::{EditorState, Viewport};
pub use markers::{Flash, Marker, MarkerLayer};
pub use workspace::Workspace;

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::PasteCycleConfig;
use crate::cycle::PasteCycle;

/// The complete application model
pub struct AppModel {
    /// Open views and the active one
    pub workspace: Workspace,
    /// Clipboard history and paste cycle, wrapping the real clipboard
    pub paste_cycle: PasteCycle<Box<dyn Clipboard>>,
    /// Handle that writes the clipboard behind the cycle's back, as another
    /// application would. Only available with the in-memory clipboard.
    pub external: Option<MemoryClipboard>,
    /// Last status line message
    pub status: String,
}

impl AppModel {
    pub fn new(
        workspace: Workspace,
        clipboard: Box<dyn Clipboard>,
        config: PasteCycleConfig,
    ) -> Self {
        Self {
            workspace,
            paste_cycle: PasteCycle::start(clipboard, config),
            external: None,
            status: String::new(),
        }
    }

    /// Model over an in-memory clipboard, keeping an external handle to it
    pub fn with_memory_clipboard(
        workspace: Workspace,
        clipboard: MemoryClipboard,
        config: PasteCycleConfig,
    ) -> Self {
        let external = clipboard.handle();
        let mut model = Self::new(workspace, Box::new(clipboard), config);
        model.external = Some(external);
        model
    }

    pub fn active_view(&self) -> Option<&EditorState> {
        self.workspace.active_view()
    }
}
