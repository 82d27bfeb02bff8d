//! Paste cycle - clipboard history for a text editor
//!
//! Records every clipboard write in a bounded history and lets repeated
//! paste commands step through it, replacing the text pasted by the previous
//! step in place. The editor model here follows the Elm Architecture pattern
//! and serves as the host the cycle runs against.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod cycle;
pub mod editable;
pub mod editor;
pub mod history;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use clipboard::{Clipboard, ClipboardContent, MemoryClipboard, SystemClipboard};
pub use commands::Cmd;
pub use config::PasteCycleConfig;
pub use cycle::{InvalidationReason, PasteCycle, PasteOutcome};
pub use editor::EditorView;
pub use history::{Entry, HistoryStore, PasteDirection, PasteMetadata};
pub use messages::Msg;
pub use model::AppModel;
