//! Tracing setup and paste cycle state snapshots for diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cycle=debug,message=debug` - scoped filtering
//! - `RUST_LOG=paste_cycle::cycle=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/paste-cycle/logs/paste-cycle.log` with daily
//! rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/paste-cycle/logs/paste-cycle.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so it never mixes with command output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "paste-cycle.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of paste cycle state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSnapshot {
    pub history_len: usize,
    pub browse_index: Option<usize>,
    pub cycle_active: bool,
    pub tracked_regions: usize,
    pub cursors: Vec<usize>,
    /// Undo stack depth of the active view
    pub undo_depth: usize,
}

impl CycleSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        let cycle = &model.paste_cycle;
        let history = cycle.history();
        let view = model.active_view();
        Self {
            history_len: history.len(),
            browse_index: history.browse_index(),
            cycle_active: cycle.is_cycle_active(),
            tracked_regions: cycle.tracked_region_count(),
            cursors: view.map(|v| v.cursor_offsets()).unwrap_or_default(),
            undo_depth: view.map_or(0, |v| v.document().history.undo_count()),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CycleSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.history_len != other.history_len {
            changes.push(format!(
                "history: {} → {}",
                self.history_len, other.history_len
            ));
        }
        if self.browse_index != other.browse_index {
            changes.push(format!(
                "index: {:?} → {:?}",
                self.browse_index, other.browse_index
            ));
        }
        if self.cycle_active != other.cycle_active {
            let status = if other.cycle_active { "entered" } else { "left" };
            changes.push(format!("cycle {}", status));
        }
        if self.tracked_regions != other.tracked_regions {
            changes.push(format!(
                "regions: {} → {}",
                self.tracked_regions, other.tracked_regions
            ));
        }
        if self.cursors != other.cursors {
            changes.push(format!("cursors: {:?} → {:?}", self.cursors, other.cursors));
        }
        if self.undo_depth != other.undo_depth {
            changes.push(format!("undo: {} → {}", self.undo_depth, other.undo_depth));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CycleSnapshot {
        CycleSnapshot {
            history_len: 2,
            browse_index: None,
            cycle_active: false,
            tracked_regions: 0,
            cursors: vec![0],
            undo_depth: 0,
        }
    }

    #[test]
    fn test_diff_identical_is_none() {
        assert_eq!(snapshot().diff(&snapshot()), None);
    }

    #[test]
    fn test_diff_describes_cycle_entry() {
        let after = CycleSnapshot {
            browse_index: Some(0),
            cycle_active: true,
            tracked_regions: 1,
            ..snapshot()
        };
        assert_eq!(
            snapshot().diff(&after).as_deref(),
            Some("index: None → Some(0); cycle entered; regions: 0 → 1")
        );
    }

    #[test]
    fn test_diff_reports_undo_depth() {
        let after = CycleSnapshot {
            undo_depth: 1,
            ..snapshot()
        };
        assert_eq!(snapshot().diff(&after).as_deref(), Some("undo: 0 → 1"));
    }
}
