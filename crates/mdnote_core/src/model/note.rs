//! Note domain model.
//!
//! # Responsibility
//! - Define the record handed from the upload workflow to the store gateway.
//! - Own tag normalization rules shared by workflow and storage.
//!
//! # Invariants
//! - `title` is non-empty once a note reaches the gateway.
//! - `tags` keep insertion order; equal values are not merged.
//! - `content` holds raw file bytes, never re-encoded.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// File extension accepted for upload, compared literally.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Logical record persisted to the `notes` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique title among stored notes (exact, case-sensitive match).
    pub title: String,
    /// Uppercase tags in the order the user added them.
    pub tags: Vec<String>,
    /// Markdown file bytes as read from disk.
    #[serde(rename = "file")]
    pub content: Vec<u8>,
}

/// Validation errors for note values before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    BlankTag(usize),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::BlankTag(index) => write!(f, "note tag at position {index} is blank"),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a note without content; content is attached after the file read.
    pub fn new(title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            tags,
            content: Vec::new(),
        }
    }

    /// Attaches file bytes read from disk.
    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = content;
        self
    }

    /// Checks invariants required before a gateway insert.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if let Some(index) = self.tags.iter().position(|tag| tag.trim().is_empty()) {
            return Err(NoteValidationError::BlankTag(index));
        }
        Ok(())
    }
}

/// Normalizes one tag value: trimmed and uppercased.
///
/// Returns `None` for blank input.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_tag, Note, NoteValidationError};

    #[test]
    fn normalize_tag_uppercases_and_trims() {
        assert_eq!(normalize_tag("  work "), Some("WORK".to_string()));
        assert_eq!(normalize_tag("Über"), Some("ÜBER".to_string()));
        assert_eq!(normalize_tag("   "), None);
    }

    #[test]
    fn validate_rejects_empty_title_and_blank_tags() {
        let note = Note::new("", vec!["A".to_string()]);
        assert_eq!(note.validate(), Err(NoteValidationError::EmptyTitle));

        let note = Note::new("T", vec!["A".to_string(), " ".to_string()]);
        assert_eq!(note.validate(), Err(NoteValidationError::BlankTag(1)));

        let note = Note::new("T", vec!["A".to_string(), "A".to_string()]);
        assert!(note.validate().is_ok());
    }

    #[test]
    fn serialized_record_uses_stored_field_names() {
        let note = Note::new("T", vec!["A".to_string(), "B".to_string()]).with_content(vec![1, 2]);
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["title"], "T");
        assert_eq!(value["tags"], serde_json::json!(["A", "B"]));
        assert_eq!(value["file"], serde_json::json!([1, 2]));
    }
}
