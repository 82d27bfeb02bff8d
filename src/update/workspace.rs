//! View switching

use crate::commands::Cmd;
use crate::messages::WorkspaceMsg;
use crate::model::AppModel;

/// Handle workspace messages. A paste cycle never outlives a view switch.
pub fn update_workspace(model: &mut AppModel, msg: WorkspaceMsg) -> Option<Cmd> {
    let switched_to = match msg {
        WorkspaceMsg::Activate(index) => {
            let Some(view) = model.workspace.activate(index) else {
                if index >= model.workspace.len() {
                    model.status = format!("No view {}", index);
                }
                return Some(Cmd::Redraw);
            };
            view
        }
        WorkspaceMsg::Open(text) => model.workspace.open(&text),
    };

    model.paste_cycle.on_active_view_changed(switched_to);
    model.status = format!("View {}", model.workspace.active_index());
    Some(Cmd::Redraw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::PasteCycleConfig;
    use crate::history::PasteDirection;
    use crate::messages::PasteMsg;
    use crate::model::Workspace;
    use crate::update::update_paste;

    #[test]
    fn test_switching_view_ends_cycle() {
        let mut workspace = Workspace::with_text("");
        workspace.open("");
        let mut model = AppModel::with_memory_clipboard(
            workspace,
            MemoryClipboard::with_text("clip"),
            PasteCycleConfig::default(),
        );

        update_paste(&mut model, PasteMsg::Cycle(PasteDirection::Older));
        assert!(model.paste_cycle.is_cycle_active());

        update_workspace(&mut model, WorkspaceMsg::Activate(0));
        assert!(!model.paste_cycle.is_cycle_active());
        assert_eq!(model.status, "View 0");
    }

    #[test]
    fn test_unknown_view_keeps_cycle() {
        let mut model = AppModel::with_memory_clipboard(
            Workspace::with_text(""),
            MemoryClipboard::with_text("clip"),
            PasteCycleConfig::default(),
        );
        update_paste(&mut model, PasteMsg::Cycle(PasteDirection::Older));
        update_workspace(&mut model, WorkspaceMsg::Activate(3));
        assert!(model.paste_cycle.is_cycle_active());
        assert_eq!(model.status, "No view 3");
    }
}
