//! Save use case: the two save destinations.
//!
//! A plain save on a never-saved document goes to the per-document cache;
//! save-as (and plain save once a path exists) goes to an explicit path.
//! Content is validated before anything is written.

use crate::{SharedSession, persist_session};
use jsonpad_core::document::UNTITLED_PREFIX;
use jsonpad_core::error::{JsonpadError, Result};
use jsonpad_core::ports::{DialogService, DocumentStore};
use jsonpad_core::repository::SessionRepository;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of a save operation. Cancellations are not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

pub struct SaveUseCase {
    session: SharedSession,
    repository: Arc<dyn SessionRepository>,
    store: Arc<dyn DocumentStore>,
    dialogs: Arc<dyn DialogService>,
}

impl SaveUseCase {
    pub fn new(
        session: SharedSession,
        repository: Arc<dyn SessionRepository>,
        store: Arc<dyn DocumentStore>,
        dialogs: Arc<dyn DialogService>,
    ) -> Self {
        Self {
            session,
            repository,
            store,
            dialogs,
        }
    }

    /// Saves the active document: to its known path if it has one, to the
    /// cache otherwise.
    pub async fn save(&self) -> Result<SaveOutcome> {
        self.save_active(false).await
    }

    /// Saves the active document to a freshly chosen explicit path.
    pub async fn save_as(&self) -> Result<SaveOutcome> {
        self.save_active(true).await
    }

    async fn save_active(&self, save_as: bool) -> Result<SaveOutcome> {
        let (id, title, file_path, content) = {
            let session = self.session.read().await;
            let doc = session
                .active()
                .ok_or_else(|| JsonpadError::internal("no active document"))?;
            (
                doc.id.clone(),
                doc.title.clone(),
                doc.file_path.clone(),
                doc.content.clone(),
            )
        };

        // validation errors abort before anything is written
        let text = content.as_json_string()?;

        // Both branches derive a default filename from the title; the cache
        // branch ignores it and addresses the destination by document id.
        let default_name = default_filename(&title);

        let target = if !save_as && file_path.is_none() {
            self.store
                .save_to_cache(&id, &text)
                .await
                .map_err(|e| JsonpadError::io(e.to_string()))?
        } else {
            let path = match (save_as, file_path) {
                (false, Some(path)) => path,
                _ => {
                    let mut name = default_name;
                    if title.starts_with(UNTITLED_PREFIX) {
                        // the base name only seeds the filename, it never
                        // renames the document
                        let Some(base) = self.dialogs.prompt_input("File name", &title).await
                        else {
                            return Ok(SaveOutcome::Cancelled);
                        };
                        if !base.trim().is_empty() {
                            name = default_filename(base.trim());
                        }
                    }
                    let Some(chosen) = self.dialogs.choose_save_path(&name, &["json"]).await
                    else {
                        return Ok(SaveOutcome::Cancelled);
                    };
                    chosen
                }
            };
            self.store
                .save_to_path(&path, &text)
                .await
                .map_err(|e| JsonpadError::io(e.to_string()))?;
            path
        };

        {
            let mut session = self.session.write().await;
            // the document may have been closed while a dialog was open
            if let Some(doc) = session.get_mut(&id) {
                doc.mark_saved(target.clone());
            }
        }
        persist_session(&self.session, &self.repository).await?;
        Ok(SaveOutcome::Saved(target))
    }
}

/// Default filename for a document title, forcing a `.json` extension
/// (case-insensitive check).
fn default_filename(title: &str) -> String {
    let base = title.trim();
    let base = if base.is_empty() { "untitled" } else { base };
    if base.to_lowercase().ends_with(".json") {
        base.to_string()
    } else {
        format!("{}.json", base)
    }
}
