//! Clipboard history: entries, metadata and the ring they live in.

mod entry;
mod store;

pub use entry::{Entry, PasteMetadata, SelectionClip};
pub use store::{HistoryStore, PasteDirection, DEFAULT_MAX_ENTRIES};
