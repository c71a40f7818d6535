//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use crate::document::Document;
use anyhow::Result;
use async_trait::async_trait;

/// An abstract repository for the persisted session state.
///
/// The persisted state is two independently-keyed entries: the ordered
/// document list and the active document id. Implementations decide the
/// concrete storage (files under the config dir, a key/value store, ...).
/// Every accepted session mutation is written through here before the
/// operation returns to its caller.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted document list.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(documents))`: a list was stored
    /// - `Ok(None)`: nothing stored yet
    /// - `Err(_)`: stored state exists but could not be read or parsed
    async fn load_documents(&self) -> Result<Option<Vec<Document>>>;

    /// Persists the full ordered document list.
    async fn save_documents(&self, documents: &[Document]) -> Result<()>;

    /// Loads the persisted active document id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(id))`: an active id was stored
    /// - `Ok(None)`: nothing stored yet
    /// - `Err(_)`: error occurred during retrieval
    async fn load_active_id(&self) -> Result<Option<String>>;

    /// Persists the active document id.
    async fn save_active_id(&self, id: &str) -> Result<()>;
}
