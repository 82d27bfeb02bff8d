//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::time::Duration;

use crate::commands::CommandId;
use crate::history::PasteDirection;

/// Editing and cursor messages for the active view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMsg {
    /// Type text at every cursor
    TypeText(String),
    /// Select a character range with a single cursor
    Select { start: usize, end: usize },
    /// Collapse to a single cursor at an offset
    MoveCursor(usize),
    /// Add another cursor at an offset
    AddCursor(usize),
    Copy,
    Cut,
    Undo,
    Redo,
}

/// Paste cycle commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteMsg {
    /// Step through history, replacing the previous step's text
    Cycle(PasteDirection),
    /// Plain paste of the last pasted entry, leaving any cycle
    PasteLast,
    /// Forget all history
    Clear,
}

/// View management messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceMsg {
    /// Make the view at this index active
    Activate(usize),
    /// Open a new view with this text
    Open(String),
}

/// Application-level messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Time passed; expires flash highlights
    Tick(Duration),
    /// Another application wrote the clipboard
    ExternalClipboardWrite(String),
    /// Print the active view
    Show,
    /// Print the history, most recent first
    ShowHistory,
    /// Print the history as JSON
    DumpHistory,
    /// List registered commands matching a query (empty lists all)
    Help(String),
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Editor(EditorMsg),
    Paste(PasteMsg),
    Workspace(WorkspaceMsg),
    App(AppMsg),
    /// A registered command invoked by id
    Command(CommandId),
}

impl From<CommandId> for Msg {
    fn from(id: CommandId) -> Self {
        match id {
            CommandId::Paste => Msg::Paste(PasteMsg::Cycle(PasteDirection::Older)),
            CommandId::PasteNewer => Msg::Paste(PasteMsg::Cycle(PasteDirection::Newer)),
            CommandId::PasteLast => Msg::Paste(PasteMsg::PasteLast),
            CommandId::ClearHistory => Msg::Paste(PasteMsg::Clear),
            CommandId::Copy => Msg::Editor(EditorMsg::Copy),
            CommandId::Cut => Msg::Editor(EditorMsg::Cut),
            CommandId::Undo => Msg::Editor(EditorMsg::Undo),
            CommandId::Redo => Msg::Editor(EditorMsg::Redo),
        }
    }
}
