//! Clipboard capability consumed by the paste cycle.
//!
//! [`SystemClipboard`] talks to the OS clipboard through `arboard`;
//! [`MemoryClipboard`] keeps everything in-process and hands out shared
//! handles, so a second handle can play "another application" writing to the
//! clipboard behind the editor's back.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};

use crate::history::PasteMetadata;

/// What the clipboard currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardContent {
    pub text: String,
    pub metadata: PasteMetadata,
}

impl ClipboardContent {
    pub fn new(text: impl Into<String>, metadata: PasteMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, PasteMetadata::default())
    }
}

/// Read/write access to a clipboard. Errors belong to the backing store and
/// are propagated untouched.
pub trait Clipboard {
    fn read(&mut self) -> Result<ClipboardContent>;

    fn write(&mut self, text: &str, metadata: &PasteMetadata) -> Result<()>;
}

impl<C: Clipboard + ?Sized> Clipboard for Box<C> {
    fn read(&mut self) -> Result<ClipboardContent> {
        (**self).read()
    }

    fn write(&mut self, text: &str, metadata: &PasteMetadata) -> Result<()> {
        (**self).write(text, metadata)
    }
}

#[derive(Debug, Default)]
struct MemoryClipboardState {
    content: ClipboardContent,
    fail_next: Option<String>,
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Rc<RefCell<MemoryClipboardState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that already holds `text`
    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        clipboard.state.borrow_mut().content = ClipboardContent::text(text);
        clipboard
    }

    /// Another handle onto the same clipboard
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Replace the contents without going through any interception, the way
    /// another application would
    pub fn set_external(&self, text: &str) {
        self.state.borrow_mut().content = ClipboardContent::text(text);
    }

    pub fn contents(&self) -> ClipboardContent {
        self.state.borrow().content.clone()
    }

    /// Make the next read or write fail with `message`
    pub fn fail_next(&self, message: &str) {
        self.state.borrow_mut().fail_next = Some(message.to_string());
    }

    fn take_failure(&self) -> Result<()> {
        match self.state.borrow_mut().fail_next.take() {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<ClipboardContent> {
        self.take_failure()?;
        Ok(self.contents())
    }

    fn write(&mut self, text: &str, metadata: &PasteMetadata) -> Result<()> {
        self.take_failure()?;
        self.state.borrow_mut().content = ClipboardContent::new(text, metadata.clone());
        Ok(())
    }
}

/// OS clipboard via `arboard`.
///
/// The OS only stores text, so the metadata of the last write is kept here
/// and returned by `read` while the clipboard still holds that same text.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    last_written: Option<ClipboardContent>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to open system clipboard")?;
        Ok(Self {
            inner,
            last_written: None,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<ClipboardContent> {
        let text = match self.inner.get_text() {
            Ok(text) => text,
            Err(arboard::Error::ContentNotAvailable) => String::new(),
            Err(e) => return Err(e).context("Failed to read system clipboard"),
        };
        let metadata = match &self.last_written {
            Some(last) if last.text == text => last.metadata.clone(),
            _ => PasteMetadata::default(),
        };
        Ok(ClipboardContent { text, metadata })
    }

    fn write(&mut self, text: &str, metadata: &PasteMetadata) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .context("Failed to write system clipboard")?;
        self.last_written = Some(ClipboardContent::new(text, metadata.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_handles_share_contents() {
        let mut clipboard = MemoryClipboard::new();
        let outside = clipboard.handle();

        clipboard.write("mine", &PasteMetadata::default()).unwrap();
        assert_eq!(outside.contents().text, "mine");

        outside.set_external("theirs");
        assert_eq!(clipboard.read().unwrap().text, "theirs");
    }

    #[test]
    fn test_memory_clipboard_keeps_metadata() {
        let mut clipboard = MemoryClipboard::new();
        let metadata = PasteMetadata {
            full_line: true,
            ..PasteMetadata::default()
        };
        clipboard.write("line\n", &metadata).unwrap();
        assert_eq!(clipboard.read().unwrap().metadata, metadata);
    }

    #[test]
    fn test_memory_clipboard_failure_is_one_shot() {
        let mut clipboard = MemoryClipboard::with_text("x");
        clipboard.fail_next("boom");
        let err = clipboard.read().unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(clipboard.read().unwrap().text, "x");
    }
}
