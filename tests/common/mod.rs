//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use paste_cycle::cli::parse_command;
use paste_cycle::clipboard::MemoryClipboard;
use paste_cycle::commands::Cmd;
use paste_cycle::config::PasteCycleConfig;
use paste_cycle::cycle::PasteCycle;
use paste_cycle::editor::ViewId;
use paste_cycle::history::PasteMetadata;
use paste_cycle::model::{AppModel, EditorState, Workspace};
use paste_cycle::update::update;

/// Controller over an in-memory clipboard after copying `copies` in order,
/// plus a handle that writes the clipboard the way another application would
pub fn cycle_with(
    copies: &[&str],
    config: PasteCycleConfig,
) -> (PasteCycle<MemoryClipboard>, MemoryClipboard) {
    let clipboard = MemoryClipboard::new();
    let outside = clipboard.handle();
    let mut cycle = PasteCycle::start(clipboard, config);
    for text in copies {
        cycle
            .on_clipboard_write(text, PasteMetadata::default())
            .expect("in-memory write");
    }
    (cycle, outside)
}

/// `cycle_with` using default options
pub fn cycle_with_history(copies: &[&str]) -> (PasteCycle<MemoryClipboard>, MemoryClipboard) {
    cycle_with(copies, PasteCycleConfig::default())
}

pub fn config_without_flash() -> PasteCycleConfig {
    PasteCycleConfig {
        flash_on_paste: false,
        ..PasteCycleConfig::default()
    }
}

/// Single-cursor view with the caret at `offset`
pub fn editor(text: &str, offset: usize) -> EditorState {
    EditorState::with_cursor(ViewId(1), text, offset)
}

/// App model with one view holding `text` and an in-memory clipboard
pub fn test_model(text: &str) -> AppModel {
    AppModel::with_memory_clipboard(
        Workspace::with_text(text),
        MemoryClipboard::new(),
        PasteCycleConfig::default(),
    )
}

/// Feed input lines through the parser and update loop, collecting printed
/// output
pub fn run_script(model: &mut AppModel, lines: &[&str]) -> Vec<String> {
    let mut printed = Vec::new();
    for line in lines {
        let msg = parse_command(line)
            .unwrap_or_else(|e| panic!("bad line {:?}: {}", line, e))
            .unwrap_or_else(|| panic!("line {:?} produced no message", line));
        if let Some(Cmd::Print(text)) = update(model, msg) {
            printed.push(text);
        }
    }
    printed
}
