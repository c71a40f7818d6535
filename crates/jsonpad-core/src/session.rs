//! Session state machine.
//!
//! A [`Session`] is the ordered set of open documents plus the active-document
//! pointer. All lifecycle transitions are pure in-memory mutations here;
//! confirmation prompts and persistence happen in the application layer
//! around these calls.
//!
//! Invariants:
//! - the session holds between 1 and [`MAX_OPEN_DOCUMENTS`] documents
//!   (zero only mid-transition, healed before control returns),
//! - `active_id` always names a member document,
//! - document ids are never reused.

use crate::document::{Document, DocumentContent, EXTRACTED_PREFIX, UNTITLED_PREFIX};
use crate::error::{JsonpadError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on simultaneously open documents.
pub const MAX_OPEN_DOCUMENTS: usize = 10;

/// The in-memory editing session: ordered documents and the active pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub documents: Vec<Document>,
    pub active_id: String,
}

impl Session {
    /// A fresh session holding a single empty `Untitled 1` document.
    pub fn fresh() -> Self {
        let doc = Document::untitled(1);
        let active_id = doc.id.clone();
        Self {
            documents: vec![doc],
            active_id,
        }
    }

    /// Rebuilds a session from persisted state.
    ///
    /// An empty document list falls back to a fresh session. A stored active
    /// id that no longer names a document is healed to the first document.
    pub fn restore(documents: Vec<Document>, active_id: Option<String>) -> Self {
        if documents.is_empty() {
            return Self::fresh();
        }
        let active_id = active_id
            .filter(|id| documents.iter().any(|d| &d.id == id))
            .unwrap_or_else(|| documents[0].id.clone());
        Self {
            documents,
            active_id,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    /// The currently focused document.
    pub fn active(&self) -> Option<&Document> {
        self.get(&self.active_id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// True while another document can still be opened.
    pub fn can_open(&self) -> bool {
        self.documents.len() < MAX_OPEN_DOCUMENTS
    }

    /// Next `Untitled {n}` index: count of titles with the prefix, plus one.
    pub fn next_untitled_index(&self) -> usize {
        self.count_prefix(UNTITLED_PREFIX) + 1
    }

    /// Next `Extracted {n}` index, by the same prefix-count rule.
    pub fn next_extracted_index(&self) -> usize {
        self.count_prefix(EXTRACTED_PREFIX) + 1
    }

    fn count_prefix(&self, prefix: &str) -> usize {
        self.documents
            .iter()
            .filter(|d| d.title.starts_with(prefix))
            .count()
    }

    /// Appends a document and makes it active.
    ///
    /// # Errors
    ///
    /// Returns [`JsonpadError::Capacity`] when the session is full; the
    /// document set is left untouched.
    pub fn open(&mut self, document: Document) -> Result<&Document> {
        if !self.can_open() {
            return Err(JsonpadError::Capacity {
                limit: MAX_OPEN_DOCUMENTS,
            });
        }
        self.active_id = document.id.clone();
        self.documents.push(document);
        Ok(self.documents.last().expect("document was just pushed"))
    }

    /// Opens a fresh empty `Untitled {n}` document.
    pub fn create_untitled(&mut self) -> Result<&Document> {
        let doc = Document::untitled(self.next_untitled_index());
        self.open(doc)
    }

    /// Opens a copy of an existing document.
    pub fn duplicate(&mut self, id: &str) -> Result<&Document> {
        let source = self.get(id).ok_or_else(|| JsonpadError::not_found(id))?;
        let copy = source.duplicate();
        self.open(copy)
    }

    /// Removes a document unconditionally and re-derives the active pointer.
    ///
    /// If the removed document was active, the next document in order becomes
    /// active, falling back to the previous one. Removing the last document
    /// heals the session to a single fresh `Untitled 1`.
    pub fn remove(&mut self, id: &str) -> Result<Document> {
        let idx = self
            .position(id)
            .ok_or_else(|| JsonpadError::not_found(id))?;
        let removed = self.documents.remove(idx);

        if self.documents.is_empty() {
            *self = Self::fresh();
        } else if self.active_id == id {
            let next = self
                .documents
                .get(idx)
                .or_else(|| self.documents.get(idx.saturating_sub(1)))
                .expect("non-empty document list");
            self.active_id = next.id.clone();
        }
        Ok(removed)
    }

    /// Retains only the given document and makes it active.
    pub fn retain_only(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(JsonpadError::not_found(id));
        }
        self.documents.retain(|d| d.id == id);
        self.active_id = id.to_string();
        Ok(())
    }

    /// Replaces the whole session with a fresh single-document one.
    pub fn reset(&mut self) {
        *self = Self::fresh();
    }

    /// Sets the title verbatim. Callers substitute the previous title for
    /// empty input before calling.
    pub fn rename(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        let doc = self
            .get_mut(id)
            .ok_or_else(|| JsonpadError::not_found(id))?;
        doc.title = title.into();
        doc.touch();
        Ok(())
    }

    /// Flips the read-only flag; `dirty` is unaffected. Returns the new value.
    pub fn toggle_read_only(&mut self, id: &str) -> Result<bool> {
        let doc = self
            .get_mut(id)
            .ok_or_else(|| JsonpadError::not_found(id))?;
        doc.read_only = !doc.read_only;
        Ok(doc.read_only)
    }

    /// Moves `from_id` to the position currently held by `to_id`, preserving
    /// the relative order of every other document. Unknown or equal ids are
    /// a no-op. Returns whether anything moved.
    pub fn reorder(&mut self, from_id: &str, to_id: &str) -> bool {
        if from_id == to_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(from_id), self.position(to_id)) else {
            return false;
        };
        let moved = self.documents.remove(from);
        self.documents.insert(to, moved);
        true
    }

    /// Makes an existing document the active one.
    pub fn activate(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(JsonpadError::not_found(id));
        }
        self.active_id = id.to_string();
        Ok(())
    }

    /// Replaces a document's content, marking it dirty.
    pub fn edit(&mut self, id: &str, content: DocumentContent) -> Result<()> {
        let doc = self
            .get_mut(id)
            .ok_or_else(|| JsonpadError::not_found(id))?;
        doc.set_content(content);
        Ok(())
    }

    /// True if any document other than `id` has unsaved edits.
    pub fn others_dirty(&self, id: &str) -> bool {
        self.documents.iter().any(|d| d.id != id && d.dirty)
    }

    /// True if any document has unsaved edits.
    pub fn any_dirty(&self) -> bool {
        self.documents.iter().any(|d| d.dirty)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::fresh()
    }
}
