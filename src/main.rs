//! paste-cycle - line-driven editor host for the clipboard paste cycle
//!
//! Reads one command per line from stdin (see `paste_cycle::cli`) and runs
//! it through the update loop against an in-memory multi-cursor editor.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use paste_cycle::cli::{parse_command, CliArgs};
use paste_cycle::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use paste_cycle::commands::Cmd;
use paste_cycle::model::{AppModel, Workspace};
use paste_cycle::update::update;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    paste_cycle::tracing::init();

    let config = args.paste_config();
    tracing::debug!(?config, "starting");

    let mut workspace = Workspace::new();
    for path in &args.paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        workspace.open(&text);
    }
    if workspace.is_empty() {
        workspace.open("");
    }

    let mut model = if args.system_clipboard {
        let clipboard: Box<dyn Clipboard> = Box::new(SystemClipboard::new()?);
        AppModel::new(workspace, clipboard, config)
    } else {
        AppModel::with_memory_clipboard(workspace, MemoryClipboard::new(), config)
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        let msg = match parse_command(&line) {
            Ok(Some(msg)) => msg,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {}", e)?;
                continue;
            }
        };

        let cmd = Cmd::from(update(&mut model, msg));
        run_cmd(&mut stdout, &cmd)?;
        if cmd.is_quit() {
            break;
        }
    }

    let AppModel { paste_cycle, .. } = model;
    drop(paste_cycle.stop());
    Ok(())
}

/// Perform the output side of a command
fn run_cmd(out: &mut impl Write, cmd: &Cmd) -> Result<()> {
    if let Cmd::Print(text) = cmd {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}
