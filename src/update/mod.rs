//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod editor;
mod paste;
mod workspace;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::CycleSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use editor::update_editor;
pub use paste::update_paste;
pub use workspace::update_workspace;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Paste(m) => paste::update_paste(model, m),
        Msg::Workspace(m) => workspace::update_workspace(model, m),
        Msg::App(m) => app::update_app(model, m),
        Msg::Command(id) => {
            let name = id.def().map_or("unregistered", |def| def.name);
            tracing::trace!(command = name, "dispatching command");
            update_inner(model, Msg::from(id))
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures paste cycle state before and after and logs the difference.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = format!("{:?}", msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = CycleSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = CycleSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cycle", %diff, "state changed");
    }

    result
}
