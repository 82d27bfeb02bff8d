//! Command types for the Elm-style architecture
//!
//! `CommandId` names what the user can invoke; `Cmd` is the side effect an
//! update asks the host to perform afterwards.

// ============================================================================
// Command Registry
// ============================================================================

/// Identifies a command the host can bind to a key or look up by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    // Paste cycle
    Paste,
    PasteNewer,
    PasteLast,
    ClearHistory,

    // Edit operations
    Copy,
    Cut,
    Undo,
    Redo,
}

/// A command definition
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: CommandId,
    /// Stable name used for lookup and in keymaps
    pub name: &'static str,
    pub label: &'static str,
    pub keybinding: Option<&'static str>,
}

/// Static registry of all available commands
pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        id: CommandId::Paste,
        name: "paste-cycle:paste",
        label: "Paste (Cycle Older)",
        keybinding: Some("⌘V"),
    },
    CommandDef {
        id: CommandId::PasteNewer,
        name: "paste-cycle:paste-newer",
        label: "Paste (Cycle Newer)",
        keybinding: Some("⇧⌘V"),
    },
    CommandDef {
        id: CommandId::PasteLast,
        name: "paste-cycle:paste-last",
        label: "Paste Last Pasted",
        keybinding: Some("⌥⌘V"),
    },
    CommandDef {
        id: CommandId::ClearHistory,
        name: "paste-cycle:clear",
        label: "Clear Clipboard History",
        keybinding: None,
    },
    CommandDef {
        id: CommandId::Copy,
        name: "core:copy",
        label: "Copy",
        keybinding: Some("⌘C"),
    },
    CommandDef {
        id: CommandId::Cut,
        name: "core:cut",
        label: "Cut",
        keybinding: Some("⌘X"),
    },
    CommandDef {
        id: CommandId::Undo,
        name: "core:undo",
        label: "Undo",
        keybinding: Some("⌘Z"),
    },
    CommandDef {
        id: CommandId::Redo,
        name: "core:redo",
        label: "Redo",
        keybinding: Some("⇧⌘Z"),
    },
];

impl CommandId {
    /// Look a command up by its registered name
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS.iter().find(|def| def.name == name).map(|def| def.id)
    }

    /// Registry entry for this command; `None` if it was never registered
    pub fn def(self) -> Option<&'static CommandDef> {
        COMMANDS.iter().find(|def| def.id == self)
    }
}

/// Case-insensitive label or name match, in registry order
pub fn filter_commands(query: &str) -> Vec<&'static CommandDef> {
    let query = query.to_lowercase();
    COMMANDS
        .iter()
        .filter(|def| {
            query.is_empty()
                || def.label.to_lowercase().contains(&query)
                || def.name.contains(&query)
        })
        .collect()
}

// ============================================================================
// Side-Effect Commands (returned from update)
// ============================================================================

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Redraw the active view and status line
    Redraw,
    /// Print text for the user
    Print(String),
    /// Request application exit
    Quit,
}

impl Cmd {
    pub fn is_quit(&self) -> bool {
        matches!(self, Cmd::Quit)
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_registered_once() {
        let ids = [
            CommandId::Paste,
            CommandId::PasteNewer,
            CommandId::PasteLast,
            CommandId::ClearHistory,
            CommandId::Copy,
            CommandId::Cut,
            CommandId::Undo,
            CommandId::Redo,
        ];
        for id in ids {
            assert!(id.def().is_some(), "{:?} is not registered", id);
        }
        for def in COMMANDS {
            assert_eq!(def.id.def().map(|d| d.name), Some(def.name));
            assert_eq!(
                COMMANDS.iter().filter(|d| d.id == def.id).count(),
                1,
                "{:?} registered twice",
                def.id
            );
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            CommandId::from_name("paste-cycle:paste-newer"),
            Some(CommandId::PasteNewer)
        );
        assert_eq!(CommandId::from_name("paste-cycle:nope"), None);
        assert_eq!(
            CommandId::ClearHistory.def().map(|d| d.name),
            Some("paste-cycle:clear")
        );
    }

    #[test]
    fn test_filter_by_name_prefix() {
        let names: Vec<_> = filter_commands("paste-cycle:")
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "paste-cycle:paste",
                "paste-cycle:paste-newer",
                "paste-cycle:paste-last",
                "paste-cycle:clear"
            ]
        );
    }

    #[test]
    fn test_filter_commands() {
        let found = filter_commands("clipboard");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, CommandId::ClearHistory);
        assert_eq!(filter_commands("").len(), COMMANDS.len());
    }

    #[test]
    fn test_cmd_quit_and_from_none() {
        assert!(Cmd::Quit.is_quit());
        assert!(!Cmd::Print("x".into()).is_quit());
        assert_eq!(Cmd::from(None), Cmd::None);
    }
}
