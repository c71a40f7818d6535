//! jsonpad application layer.
//!
//! Use cases orchestrating the session state machine with the injected
//! ports: document lifecycle with confirmation gating, the two save
//! destinations, field extraction, spreadsheet export, and the command
//! table mapping menu/keyboard triggers onto those operations.
//!
//! Every accepted session mutation is written through to the session
//! repository before the operation returns to its caller.

pub mod command;
pub mod document_usecase;
pub mod export_usecase;
pub mod extract_usecase;
pub mod save_usecase;

#[cfg(test)]
pub(crate) mod test_support;

pub use command::{Command, CommandDispatcher, CommandOutcome};
pub use document_usecase::DocumentUseCase;
pub use export_usecase::{ExportOutcome, ExportUseCase};
pub use extract_usecase::ExtractUseCase;
pub use save_usecase::{SaveOutcome, SaveUseCase};

use jsonpad_core::error::{JsonpadError, Result};
use jsonpad_core::repository::SessionRepository;
use jsonpad_core::session::Session;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The in-memory session shared by all use cases.
pub type SharedSession = Arc<RwLock<Session>>;

/// Writes both persisted entries (document list and active id) through to
/// the repository.
pub(crate) async fn persist_session(
    session: &SharedSession,
    repository: &Arc<dyn SessionRepository>,
) -> Result<()> {
    let (documents, active_id) = {
        let session = session.read().await;
        (session.documents.clone(), session.active_id.clone())
    };
    repository
        .save_documents(&documents)
        .await
        .map_err(|e| JsonpadError::io(e.to_string()))?;
    repository
        .save_active_id(&active_id)
        .await
        .map_err(|e| JsonpadError::io(e.to_string()))?;
    Ok(())
}
