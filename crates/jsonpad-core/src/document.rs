//! Document domain model.
//!
//! A document is one open tab of the editor: a JSON payload plus its
//! display title, read-only/dirty flags, and an optional on-disk location.

use crate::error::{JsonpadError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Title prefix used for fresh documents (`Untitled 1`, `Untitled 2`, ...).
pub const UNTITLED_PREFIX: &str = "Untitled";

/// Title prefix used for extraction results (`Extracted 1`, ...).
pub const EXTRACTED_PREFIX: &str = "Extracted";

/// JSON payload of a document.
///
/// Exactly one representation is present at any time: either the raw source
/// text as typed into the editor, or an already-parsed value produced by a
/// transform. Serializes as `{"text": "..."}` or `{"json": ...}`, the layout
/// the persisted session has always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentContent {
    Text { text: String },
    Json { json: Value },
}

impl DocumentContent {
    /// An empty text payload, the content of a fresh document.
    pub fn empty() -> Self {
        Self::Text {
            text: String::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn json(json: Value) -> Self {
        Self::Json { json }
    }

    /// Returns the content as a JSON source string, validating it first.
    ///
    /// Raw text must parse as JSON and is returned verbatim; a parsed value
    /// is re-serialized with 2-space indentation. Whitespace-only text is
    /// rejected as having nothing to save.
    ///
    /// # Errors
    ///
    /// - [`JsonpadError::EmptyContent`] if there is no content
    /// - [`JsonpadError::Json`] if the raw text is not valid JSON
    pub fn as_json_string(&self) -> Result<String> {
        match self {
            Self::Text { text } => {
                if text.trim().is_empty() {
                    return Err(JsonpadError::EmptyContent);
                }
                serde_json::from_str::<Value>(text)?;
                Ok(text.clone())
            }
            Self::Json { json } => {
                let text = serde_json::to_string_pretty(json)
                    .map_err(|e| JsonpadError::json(e.to_string()))?;
                Ok(text)
            }
        }
    }

    /// Parses the content into a JSON value regardless of representation.
    pub fn to_value(&self) -> Result<Value> {
        match self {
            Self::Text { text } => Ok(serde_json::from_str(text)?),
            Self::Json { json } => Ok(json.clone()),
        }
    }
}

impl Default for DocumentContent {
    fn default() -> Self {
        Self::empty()
    }
}

/// One open document of the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Opaque unique identifier, assigned at creation and never reused
    pub id: String,
    /// Display title
    pub title: String,
    /// JSON payload
    pub content: DocumentContent,
    /// Whether edits are rejected by the editor surface
    pub read_only: bool,
    /// Whether the content has unsaved edits
    pub dirty: bool,
    /// On-disk location once the document has been saved anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Timestamp when the document was created (ISO 8601)
    #[serde(default)]
    pub created_at: String,
    /// Timestamp when the document was last modified (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Document {
    /// Creates a fresh empty document titled `Untitled {n}`.
    pub fn untitled(n: usize) -> Self {
        let now = now_timestamp();
        Self {
            id: generate_id(),
            title: format!("{} {}", UNTITLED_PREFIX, n),
            content: DocumentContent::empty(),
            read_only: false,
            dirty: false,
            file_path: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Creates a read-only extraction result titled `Extracted {n}`.
    pub fn extracted(n: usize, rows: Value) -> Self {
        let now = now_timestamp();
        Self {
            id: generate_id(),
            title: format!("{} {}", EXTRACTED_PREFIX, n),
            content: DocumentContent::json(rows),
            read_only: true,
            dirty: false,
            file_path: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Creates a copy of this document with a fresh id and a `" (copy)"`
    /// title suffix. The copy starts dirty; everything else carries over.
    pub fn duplicate(&self) -> Self {
        let now = now_timestamp();
        Self {
            id: generate_id(),
            title: format!("{} (copy)", self.title),
            dirty: true,
            created_at: now.clone(),
            updated_at: now,
            ..self.clone()
        }
    }

    /// True while the document still carries a default `Untitled` title.
    pub fn is_untitled(&self) -> bool {
        self.title.starts_with(UNTITLED_PREFIX)
    }

    /// Replaces the content and marks the document dirty.
    pub fn set_content(&mut self, content: DocumentContent) {
        self.content = content;
        self.dirty = true;
        self.touch();
    }

    /// Records a successful save: sets the destination and clears `dirty`.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.file_path = Some(path);
        self.dirty = false;
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = now_timestamp();
    }
}
