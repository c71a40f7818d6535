//! File-backed SessionRepository implementation.
//!
//! Persists the session as two independently-keyed files under the base
//! directory, mirroring the two entries of the session state store:
//!
//! ```text
//! base_dir/
//! ├── documents.json           # ordered document list, pretty JSON
//! └── active_document.txt      # active document id, plain string
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonpad_core::document::Document;
use jsonpad_core::repository::SessionRepository;
use std::path::{Path, PathBuf};
use tokio::fs;

const DOCUMENTS_FILE: &str = "documents.json";
const ACTIVE_FILE: &str = "active_document.txt";

/// Session persistence backed by plain files.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Creates a new repository rooted at `base_dir`, creating the directory
    /// if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .await
            .context("Failed to create session state directory")?;
        Ok(Self { base_dir })
    }

    /// Creates a repository at the default per-user location
    /// (`~/.config/jsonpad`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or
    /// created.
    pub async fn default_location() -> Result<Self> {
        let base_dir = crate::paths::JsonpadPaths::config_dir()
            .context("Failed to resolve config directory")?;
        Self::new(base_dir).await
    }

    fn documents_path(&self) -> PathBuf {
        self.base_dir.join(DOCUMENTS_FILE)
    }

    fn active_path(&self) -> PathBuf {
        self.base_dir.join(ACTIVE_FILE)
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load_documents(&self) -> Result<Option<Vec<Document>>> {
        let path = self.documents_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .await
            .context(format!("Failed to read document list: {:?}", path))?;
        let documents: Vec<Document> =
            serde_json::from_str(&json).context("Failed to deserialize document list")?;
        Ok(Some(documents))
    }

    async fn save_documents(&self, documents: &[Document]) -> Result<()> {
        let path = self.documents_path();
        let json =
            serde_json::to_string_pretty(documents).context("Failed to serialize document list")?;
        fs::write(&path, json)
            .await
            .context(format!("Failed to write document list: {:?}", path))?;
        tracing::debug!("Persisted {} documents", documents.len());
        Ok(())
    }

    async fn load_active_id(&self) -> Result<Option<String>> {
        let path = self.active_path();
        if !path.exists() {
            return Ok(None);
        }
        let id = fs::read_to_string(&path)
            .await
            .context("Failed to read active document id")?;
        let id = id.trim().to_string();
        if id.is_empty() {
            return Ok(None);
        }
        Ok(Some(id))
    }

    async fn save_active_id(&self, id: &str) -> Result<()> {
        fs::write(self.active_path(), id)
            .await
            .context("Failed to write active document id")?;
        Ok(())
    }
}
