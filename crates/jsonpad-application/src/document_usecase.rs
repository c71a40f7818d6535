//! Document lifecycle use case.
//!
//! Orchestrates session transitions around the ports: startup restore with
//! silent fallback, confirmation-gated closes, and write-through persistence
//! after every accepted mutation.
//!
//! Confirmation prompts are awaited without the session lock held, so other
//! operations stay free to run while a dialog is open. On resume the target
//! document is re-checked; if it vanished in the meantime the operation is
//! a no-op.

use crate::{SharedSession, persist_session};
use jsonpad_core::document::DocumentContent;
use jsonpad_core::error::Result;
use jsonpad_core::ports::DialogService;
use jsonpad_core::repository::SessionRepository;
use jsonpad_core::session::Session;
use std::sync::Arc;

pub struct DocumentUseCase {
    session: SharedSession,
    repository: Arc<dyn SessionRepository>,
    dialogs: Arc<dyn DialogService>,
}

impl DocumentUseCase {
    pub fn new(
        session: SharedSession,
        repository: Arc<dyn SessionRepository>,
        dialogs: Arc<dyn DialogService>,
    ) -> Self {
        Self {
            session,
            repository,
            dialogs,
        }
    }

    /// Restores the persisted session, falling back to a fresh single
    /// document on missing, empty, or unreadable state. Load failures are
    /// never surfaced.
    pub async fn restore(&self) {
        let documents = match self.repository.load_documents().await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::debug!("Stored document list unreadable, starting fresh: {:#}", e);
                None
            }
        };
        let restored = match documents {
            Some(documents) if !documents.is_empty() => {
                let active_id = self.repository.load_active_id().await.ok().flatten();
                Session::restore(documents, active_id)
            }
            _ => Session::fresh(),
        };

        *self.session.write().await = restored;

        if let Err(e) = self.persist().await {
            tracing::warn!("Failed to persist restored session: {}", e);
        }
    }

    /// Opens a fresh `Untitled {n}` document and makes it active.
    ///
    /// # Errors
    ///
    /// Returns a capacity error when the session is full; nothing changes.
    pub async fn create(&self) -> Result<String> {
        let id = {
            let mut session = self.session.write().await;
            session.create_untitled()?.id.clone()
        };
        self.persist().await?;
        Ok(id)
    }

    /// Opens a copy of an existing document and makes it active.
    pub async fn duplicate(&self, id: &str) -> Result<String> {
        let copy_id = {
            let mut session = self.session.write().await;
            session.duplicate(id)?.id.clone()
        };
        self.persist().await?;
        Ok(copy_id)
    }

    /// Closes a document, asking for confirmation when it has unsaved edits.
    ///
    /// Returns whether the document was removed; a declined confirmation or
    /// an unknown id leaves the session untouched and returns `false`.
    pub async fn close(&self, id: &str) -> Result<bool> {
        let dirty_title = {
            let session = self.session.read().await;
            match session.get(id) {
                None => return Ok(false),
                Some(doc) => doc.dirty.then(|| doc.title.clone()),
            }
        };

        if let Some(title) = dirty_title {
            let message = format!(
                "Closing \"{}\" will discard unsaved changes. Close it?",
                title
            );
            if !self.dialogs.confirm("Unsaved changes", &message).await {
                return Ok(false);
            }
        }

        {
            let mut session = self.session.write().await;
            if session.get(id).is_none() {
                return Ok(false);
            }
            session.remove(id)?;
        }
        self.persist().await?;
        Ok(true)
    }

    /// Closes every document except `id`, with one confirmation covering all
    /// dirty ones.
    pub async fn close_others(&self, id: &str) -> Result<bool> {
        let others_dirty = {
            let session = self.session.read().await;
            if session.get(id).is_none() {
                return Ok(false);
            }
            session.others_dirty(id)
        };

        if others_dirty {
            let confirmed = self
                .dialogs
                .confirm(
                    "Unsaved changes",
                    "Closing other documents will discard unsaved changes. Close them?",
                )
                .await;
            if !confirmed {
                return Ok(false);
            }
        }

        {
            let mut session = self.session.write().await;
            if session.get(id).is_none() {
                return Ok(false);
            }
            session.retain_only(id)?;
        }
        self.persist().await?;
        Ok(true)
    }

    /// Closes every document, with one confirmation when any is dirty. The
    /// session ends up holding a single fresh `Untitled 1` document.
    pub async fn close_all(&self) -> Result<bool> {
        let any_dirty = self.session.read().await.any_dirty();

        if any_dirty {
            let confirmed = self
                .dialogs
                .confirm(
                    "Unsaved changes",
                    "Closing all documents will discard unsaved changes. Close all?",
                )
                .await;
            if !confirmed {
                return Ok(false);
            }
        }

        self.session.write().await.reset();
        self.persist().await?;
        Ok(true)
    }

    /// Renames a document. Empty input keeps the previous title.
    pub async fn rename(&self, id: &str, title: &str) -> Result<()> {
        if title.is_empty() {
            return Ok(());
        }
        self.session.write().await.rename(id, title)?;
        self.persist().await
    }

    /// Flips a document's read-only flag. Returns the new value.
    pub async fn toggle_read_only(&self, id: &str) -> Result<bool> {
        let read_only = self.session.write().await.toggle_read_only(id)?;
        self.persist().await?;
        Ok(read_only)
    }

    /// Moves a document to another document's position. Returns whether
    /// anything moved.
    pub async fn reorder(&self, from_id: &str, to_id: &str) -> Result<bool> {
        let moved = self.session.write().await.reorder(from_id, to_id);
        if moved {
            self.persist().await?;
        }
        Ok(moved)
    }

    /// Makes a document the active one.
    pub async fn activate(&self, id: &str) -> Result<()> {
        self.session.write().await.activate(id)?;
        self.persist().await
    }

    /// Replaces a document's content, marking it dirty.
    pub async fn edit(&self, id: &str, content: DocumentContent) -> Result<()> {
        self.session.write().await.edit(id, content)?;
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        persist_session(&self.session, &self.repository).await
    }
}
