//! Editing, selection and clipboard messages for the active view

use crate::clipboard::ClipboardContent;
use crate::commands::Cmd;
use crate::messages::EditorMsg;
use crate::model::AppModel;

/// Handle editor messages
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    let editor = model.workspace.active_view_mut()?;

    match msg {
        EditorMsg::TypeText(text) => {
            editor.type_text(&text);
            Some(Cmd::Redraw)
        }

        EditorMsg::Select { start, end } => {
            editor.select(start..end);
            Some(Cmd::Redraw)
        }

        EditorMsg::MoveCursor(offset) => {
            editor.set_cursor(offset);
            Some(Cmd::Redraw)
        }

        EditorMsg::AddCursor(offset) => {
            editor.add_cursor(offset);
            Some(Cmd::Redraw)
        }

        EditorMsg::Copy => {
            let content = editor.copy()?;
            Some(write_clipboard(model, content, "Copied"))
        }

        EditorMsg::Cut => {
            // Cut only edits the buffer once the clipboard took the text
            let content = editor.copy()?;
            let cmd = write_clipboard(model, content, "Cut");
            if cmd == Cmd::Redraw {
                if let Some(editor) = model.workspace.active_view_mut() {
                    editor.cut();
                }
            }
            Some(cmd)
        }

        EditorMsg::Undo => {
            if !editor.undo() {
                model.status = "Nothing to undo".to_string();
            }
            Some(Cmd::Redraw)
        }

        EditorMsg::Redo => {
            if !editor.redo() {
                model.status = "Nothing to redo".to_string();
            }
            Some(Cmd::Redraw)
        }
    }
}

/// Route a copy through the paste cycle so history sees it
fn write_clipboard(model: &mut AppModel, content: ClipboardContent, verb: &str) -> Cmd {
    let ClipboardContent { text, metadata } = content;
    let chars = text.chars().count();
    match model.paste_cycle.on_clipboard_write(&text, metadata) {
        Ok(()) => {
            model.status = format!("{} {} characters", verb, chars);
            Cmd::Redraw
        }
        Err(e) => {
            tracing::warn!("Clipboard write failed: {:#}", e);
            model.status = format!("Clipboard error: {:#}", e);
            Cmd::Print(model.status.clone())
        }
    }
}
