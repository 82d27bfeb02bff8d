//! Paste cycle commands

use crate::commands::Cmd;
use crate::cycle::PasteOutcome;
use crate::messages::PasteMsg;
use crate::model::AppModel;

/// Handle paste cycle messages against the active view
pub fn update_paste(model: &mut AppModel, msg: PasteMsg) -> Option<Cmd> {
    if msg == PasteMsg::Clear {
        model.paste_cycle.clear();
        model.status = "Clipboard history cleared".to_string();
        return Some(Cmd::Redraw);
    }

    let editor = model.workspace.active_view_mut()?;
    let result = match msg {
        PasteMsg::Cycle(direction) => model.paste_cycle.paste(editor, direction),
        PasteMsg::PasteLast => model.paste_cycle.paste_last(editor),
        PasteMsg::Clear => return None,
    };

    match result {
        Ok(PasteOutcome::Pasted(_)) => {
            let history = model.paste_cycle.history();
            let position = history.browse_index().map_or(0, |i| i + 1);
            model.status = format!("Paste {}/{}", position, history.len());
        }
        Ok(PasteOutcome::NormalPaste) => model.status = "Pasted".to_string(),
        Ok(PasteOutcome::NothingToPaste) => model.status = "Clipboard history is empty".to_string(),
        Err(e) => {
            tracing::warn!("Paste failed: {:#}", e);
            model.status = format!("Paste failed: {:#}", e);
        }
    }
    Some(Cmd::Redraw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::PasteCycleConfig;
    use crate::history::PasteDirection;
    use crate::model::Workspace;

    #[test]
    fn test_cycle_status_shows_position() {
        let clipboard = MemoryClipboard::new();
        let mut model = AppModel::with_memory_clipboard(
            Workspace::with_text(""),
            clipboard.handle(),
            PasteCycleConfig::default(),
        );
        clipboard.set_external("one");
        update_paste(&mut model, PasteMsg::Cycle(PasteDirection::Older));
        assert_eq!(model.status, "Paste 1/1");
        assert_eq!(model.active_view().unwrap().text(), "one");
    }

    #[test]
    fn test_empty_history_status() {
        let mut model = AppModel::with_memory_clipboard(
            Workspace::with_text("x"),
            MemoryClipboard::new(),
            PasteCycleConfig::default(),
        );
        update_paste(&mut model, PasteMsg::Cycle(PasteDirection::Newer));
        assert_eq!(model.status, "Clipboard history is empty");
    }

    #[test]
    fn test_read_failure_reported() {
        let clipboard = MemoryClipboard::with_text("x");
        let mut model = AppModel::with_memory_clipboard(
            Workspace::with_text(""),
            clipboard.handle(),
            PasteCycleConfig::default(),
        );
        clipboard.fail_next("locked");
        update_paste(&mut model, PasteMsg::Cycle(PasteDirection::Older));
        assert_eq!(model.status, "Paste failed: locked");
        assert_eq!(model.active_view().unwrap().text(), "");
        assert!(model.paste_cycle.history().is_empty());
    }
}
