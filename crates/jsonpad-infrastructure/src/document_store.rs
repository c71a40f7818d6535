//! File-system DocumentStore implementation.
//!
//! Cache saves land in per-id files under the cache directory; explicit-path
//! saves and byte writes go wherever the caller chose.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonpad_core::ports::DocumentStore;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Document byte storage on the local file system.
pub struct FsDocumentStore {
    cache_dir: PathBuf,
}

impl FsDocumentStore {
    /// Creates a store with the given cache directory, creating it if
    /// necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub async fn new(cache_dir: impl AsRef<Path>) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)
            .await
            .context("Failed to create cache directory")?;
        Ok(Self { cache_dir })
    }

    /// Creates a store at the default per-user cache location
    /// (`~/.config/jsonpad/cache`).
    pub async fn default_location() -> Result<Self> {
        let cache_dir = crate::paths::JsonpadPaths::cache_dir()
            .context("Failed to resolve cache directory")?;
        Self::new(cache_dir).await
    }

    fn cache_path(&self, document_id: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", document_id))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn save_to_cache(&self, document_id: &str, content: &str) -> Result<PathBuf> {
        let path = self.cache_path(document_id);
        fs::write(&path, content)
            .await
            .context(format!("Failed to write cache file: {:?}", path))?;
        tracing::debug!("Cached document {} at {:?}", document_id, path);
        Ok(path)
    }

    async fn save_to_path(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)
            .await
            .context(format!("Failed to write file: {:?}", path))?;
        tracing::debug!("Saved document to {:?}", path);
        Ok(())
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes)
            .await
            .context(format!("Failed to write file: {:?}", path))?;
        tracing::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}
