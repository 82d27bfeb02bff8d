//! Command-line argument parsing and the line-oriented command language
//!
//! Supports:
//! - Opening files as views
//! - Overriding paste cycle options for one run
//! - Using the OS clipboard instead of the in-memory one

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::commands::CommandId;
use crate::config::PasteCycleConfig;
use crate::history::PasteDirection;
use crate::messages::{AppMsg, EditorMsg, Msg, PasteMsg, WorkspaceMsg};

/// Clipboard history with an in-place paste cycle
#[derive(Parser, Debug)]
#[command(
    name = "paste-cycle",
    version,
    about = "Clipboard history with an in-place paste cycle"
)]
pub struct CliArgs {
    /// Files to open, one view each
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Number of history entries to remember
    #[arg(long, value_name = "N")]
    pub max: Option<usize>,

    /// Use the OS clipboard instead of an in-memory one
    #[arg(long)]
    pub system_clipboard: bool,

    /// Read options from this YAML file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not highlight pasted text
    #[arg(long)]
    pub no_flash: bool,
}

impl CliArgs {
    /// Load the config file and apply command-line overrides
    pub fn paste_config(&self) -> PasteCycleConfig {
        let mut config = match &self.config {
            Some(path) => PasteCycleConfig::load_from(path),
            None => PasteCycleConfig::load(),
        };
        if let Some(max) = self.max {
            config.max = max;
        }
        if self.no_flash {
            config.flash_on_paste = false;
        }
        config
    }
}

/// Parse one line of input into a message.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_command(line: &str) -> Result<Option<Msg>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };

    let msg = match word {
        "type" => Msg::Editor(EditorMsg::TypeText(unescape(rest))),
        "select" => {
            let (start, end) = two_numbers(rest)?;
            Msg::Editor(EditorMsg::Select { start, end })
        }
        "move" => Msg::Editor(EditorMsg::MoveCursor(number(rest)?)),
        "cursor" => Msg::Editor(EditorMsg::AddCursor(number(rest)?)),
        "copy" => Msg::Editor(EditorMsg::Copy),
        "cut" => Msg::Editor(EditorMsg::Cut),
        "undo" => Msg::Editor(EditorMsg::Undo),
        "redo" => Msg::Editor(EditorMsg::Redo),
        "paste" => Msg::Paste(PasteMsg::Cycle(PasteDirection::Older)),
        "paste-newer" => Msg::Paste(PasteMsg::Cycle(PasteDirection::Newer)),
        "paste-last" => Msg::Paste(PasteMsg::PasteLast),
        "clear" => Msg::Paste(PasteMsg::Clear),
        "view" => Msg::Workspace(WorkspaceMsg::Activate(number(rest)?)),
        "open" => Msg::Workspace(WorkspaceMsg::Open(unescape(rest))),
        "external" => Msg::App(AppMsg::ExternalClipboardWrite(unescape(rest))),
        "tick" => Msg::App(AppMsg::Tick(Duration::from_millis(number(rest)? as u64))),
        "show" => Msg::App(AppMsg::Show),
        "history" => Msg::App(AppMsg::ShowHistory),
        "dump" => Msg::App(AppMsg::DumpHistory),
        "help" => Msg::App(AppMsg::Help(rest.trim().to_string())),
        "quit" | "exit" => Msg::App(AppMsg::Quit),
        name => match CommandId::from_name(name) {
            Some(id) => Msg::Command(id),
            None => return Err(format!("Unknown command: {}", name)),
        },
    };
    Ok(Some(msg))
}

fn number(arg: &str) -> Result<usize, String> {
    let arg = arg.trim();
    arg.parse()
        .map_err(|_| format!("Expected a number, got {:?}", arg))
}

fn two_numbers(arg: &str) -> Result<(usize, usize), String> {
    let mut parts = arg.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((number(a)?, number(b)?)),
        _ => Err(format!("Expected two numbers, got {:?}", arg.trim())),
    }
}

/// `\n` and `\t` escapes so multi-line text fits on one input line
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
