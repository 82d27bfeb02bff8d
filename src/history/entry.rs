//! Clipboard history entries and their paste metadata.

use serde::{Deserialize, Serialize};

/// One selection's worth of a multi-cursor copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionClip {
    pub text: String,
    /// Indentation (in columns) of the line the selection started on
    #[serde(default)]
    pub indent_basis: usize,
    /// The copy took the whole line (copy with an empty selection)
    #[serde(default)]
    pub full_line: bool,
}

impl SelectionClip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Editor-specific paste hints recorded alongside clipboard text.
///
/// History logic never interprets these; they only take part in the
/// equality check used for deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_basis: Option<usize>,
    #[serde(default)]
    pub full_line: bool,
    /// Per-cursor clips, in cursor order, when the copy came from several cursors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selections: Option<Vec<SelectionClip>>,
}

impl PasteMetadata {
    /// Metadata for a copy made with several cursors
    pub fn from_clips(clips: Vec<SelectionClip>) -> Self {
        Self {
            selections: Some(clips),
            ..Self::default()
        }
    }

    pub fn is_multi_cursor(&self) -> bool {
        self.selections.is_some()
    }
}

/// A stored clipboard payload. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    text: String,
    #[serde(default)]
    metadata: PasteMetadata,
}

impl Entry {
    pub fn new(text: impl Into<String>, metadata: PasteMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &PasteMetadata {
        &self.metadata
    }

    /// Dedup equality: text must match exactly. Metadata is compared field by
    /// field only when either side carries per-cursor clips; plain metadata
    /// is ignored.
    pub fn matches(&self, text: &str, metadata: &PasteMetadata) -> bool {
        if self.text != text {
            return false;
        }
        if self.metadata.is_multi_cursor() || metadata.is_multi_cursor() {
            return self.metadata == *metadata;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_metadata_compared_loosely() {
        let entry = Entry::new(
            "foo",
            PasteMetadata {
                indent_basis: Some(4),
                full_line: true,
                selections: None,
            },
        );
        assert!(entry.matches("foo", &PasteMetadata::default()));
        assert!(!entry.matches("foo ", &PasteMetadata::default()));
    }

    #[test]
    fn test_multi_cursor_metadata_compared_field_wise() {
        let clips = vec![SelectionClip::new("a"), SelectionClip::new("b")];
        let entry = Entry::new("a\nb", PasteMetadata::from_clips(clips.clone()));

        assert!(entry.matches("a\nb", &PasteMetadata::from_clips(clips.clone())));
        assert!(!entry.matches("a\nb", &PasteMetadata::default()));

        let mut indented = clips;
        indented[1].indent_basis = 2;
        assert!(!entry.matches("a\nb", &PasteMetadata::from_clips(indented)));
    }

    #[test]
    fn test_multi_cursor_on_incoming_side_only() {
        let entry = Entry::new("a\nb", PasteMetadata::default());
        let incoming = PasteMetadata::from_clips(vec![SelectionClip::new("a")]);
        assert!(!entry.matches("a\nb", &incoming));
    }
}
