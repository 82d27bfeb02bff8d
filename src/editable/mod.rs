//! Text editing primitives shared by the editor model.
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: traits abstracting over buffer storage
//! - [`RopeBuffer`]: buffer for multi-line documents (backed by `ropey::Rope`)
//! - [`Cursor`] / [`Selection`]: caret and selection in character offsets
//! - [`EditHistory`]: undo/redo with checkpoints that can group or revert
//!   everything recorded after them

mod buffer;
mod cursor;
mod history;
mod selection;

pub use buffer::{RopeBuffer, TextBuffer, TextBufferMut};
pub use cursor::{Cursor, CursorId, Position};
pub use history::{Assoc, CheckpointId, EditHistory, EditOperation, Transaction};
pub use selection::Selection;
