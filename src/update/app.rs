//! Application-level messages: clock, external clipboard, inspection

use crate::commands::{filter_commands, Cmd};
use crate::messages::AppMsg;
use crate::model::AppModel;

/// Handle application messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Tick(elapsed) => {
            for view in model.workspace.views_mut() {
                view.advance_clock(elapsed);
            }
            Some(Cmd::Redraw)
        }

        AppMsg::ExternalClipboardWrite(text) => {
            match &model.external {
                Some(clipboard) => {
                    clipboard.set_external(&text);
                    model.status = "Clipboard changed outside the editor".to_string();
                }
                None => {
                    model.status =
                        "External writes need the in-memory clipboard".to_string();
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::Show => Some(Cmd::Print(render_active_view(model))),

        AppMsg::ShowHistory => {
            let history = model.paste_cycle.history();
            let lines: Vec<String> = history
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let marker = if history.browse_index() == Some(i) { '>' } else { ' ' };
                    format!("{}{:>3}: {:?}", marker, i, entry.text())
                })
                .collect();
            if lines.is_empty() {
                Some(Cmd::Print("(history empty)".to_string()))
            } else {
                Some(Cmd::Print(lines.join("\n")))
            }
        }

        AppMsg::DumpHistory => {
            let history = model.paste_cycle.history();
            let entries: Vec<_> = history.iter().collect();
            match serde_json::to_string_pretty(&entries) {
                Ok(json) => Some(Cmd::Print(json)),
                Err(e) => {
                    tracing::warn!("Failed to serialize history: {}", e);
                    None
                }
            }
        }

        AppMsg::Help(query) => {
            let lines: Vec<String> = filter_commands(&query)
                .into_iter()
                .map(|def| {
                    format!(
                        "{:<24} {:<26} {}",
                        def.name,
                        def.label,
                        def.keybinding.unwrap_or("")
                    )
                    .trim_end()
                    .to_string()
                })
                .collect();
            if lines.is_empty() {
                Some(Cmd::Print(format!("No command matches {:?}", query)))
            } else {
                Some(Cmd::Print(lines.join("\n")))
            }
        }

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

/// Active view with cursors drawn in, flashes listed, then the status line
pub fn render_active_view(model: &AppModel) -> String {
    let Some(view) = model.active_view() else {
        return "(no view)".to_string();
    };
    let mut out = view.render();
    let flashes = view.flash_ranges();
    if !flashes.is_empty() {
        out.push_str(&format!("\n-- flash {:?}", flashes));
    }
    if model.paste_cycle.is_cycle_active() {
        out.push_str("\n-- in paste cycle");
    }
    if !model.status.is_empty() {
        out.push_str(&format!("\n-- {}", model.status));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::PasteCycleConfig;
    use crate::history::PasteMetadata;
    use crate::model::Workspace;

    fn model() -> AppModel {
        AppModel::with_memory_clipboard(
            Workspace::with_text("abc"),
            MemoryClipboard::new(),
            PasteCycleConfig::default(),
        )
    }

    #[test]
    fn test_external_write_bypasses_history() {
        let mut model = model();
        update_app(&mut model, AppMsg::ExternalClipboardWrite("other".into()));
        assert!(model.paste_cycle.history().is_empty());
        assert_eq!(model.external.as_ref().unwrap().contents().text, "other");
    }

    #[test]
    fn test_show_history_marks_nothing_outside_cycle() {
        let mut model = model();
        model
            .paste_cycle
            .on_clipboard_write("x", PasteMetadata::default())
            .unwrap();
        let cmd = update_app(&mut model, AppMsg::ShowHistory);
        assert_eq!(cmd, Some(Cmd::Print("   0: \"x\"".to_string())));
    }

    #[test]
    fn test_dump_history_is_json() {
        let mut model = model();
        model
            .paste_cycle
            .on_clipboard_write("x", PasteMetadata::default())
            .unwrap();
        let Some(Cmd::Print(json)) = update_app(&mut model, AppMsg::DumpHistory) else {
            panic!("expected printed JSON");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["text"], "x");
    }

    #[test]
    fn test_help_lists_matching_commands_with_keybindings() {
        let mut model = model();
        let Some(Cmd::Print(text)) = update_app(&mut model, AppMsg::Help("undo".into())) else {
            panic!("expected help text");
        };
        assert!(text.starts_with("core:undo"), "got {:?}", text);
        assert!(text.contains("Undo"));
        assert!(text.ends_with("⌘Z"));
        assert!(!text.contains('\n'));

        let Some(Cmd::Print(all)) = update_app(&mut model, AppMsg::Help(String::new())) else {
            panic!("expected help text");
        };
        assert_eq!(all.lines().count(), crate::commands::COMMANDS.len());
        assert!(all.lines().any(|l| l.trim_end() == l && l.contains("Clear Clipboard History")));
    }

    #[test]
    fn test_help_without_match() {
        let mut model = model();
        assert_eq!(
            update_app(&mut model, AppMsg::Help("zzz".into())),
            Some(Cmd::Print("No command matches \"zzz\"".to_string()))
        );
    }

    #[test]
    fn test_show_renders_cursor() {
        let mut model = model();
        model.status.clear();
        assert_eq!(update_app(&mut model, AppMsg::Show), Some(Cmd::Print("|abc".to_string())));
    }
}
