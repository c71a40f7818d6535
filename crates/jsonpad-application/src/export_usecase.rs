//! Spreadsheet export use case.
//!
//! Validates the active document's content, hands the JSON text to the
//! conversion collaborator, and writes the returned bytes to a user-chosen
//! destination. Export never mutates the session.

use crate::SharedSession;
use jsonpad_core::error::{JsonpadError, Result};
use jsonpad_core::ports::{DialogService, DocumentStore, SpreadsheetConverter};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_EXPORT_FILENAME: &str = "data.xlsx";

/// Result of an export operation. Cancellations are not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Exported(PathBuf),
    Cancelled,
}

pub struct ExportUseCase {
    session: SharedSession,
    store: Arc<dyn DocumentStore>,
    converter: Arc<dyn SpreadsheetConverter>,
    dialogs: Arc<dyn DialogService>,
}

impl ExportUseCase {
    pub fn new(
        session: SharedSession,
        store: Arc<dyn DocumentStore>,
        converter: Arc<dyn SpreadsheetConverter>,
        dialogs: Arc<dyn DialogService>,
    ) -> Self {
        Self {
            session,
            store,
            converter,
            dialogs,
        }
    }

    /// Exports the active document as a spreadsheet.
    pub async fn export(&self) -> Result<ExportOutcome> {
        let content = {
            let session = self.session.read().await;
            session
                .active()
                .ok_or_else(|| JsonpadError::internal("no active document"))?
                .content
                .clone()
        };

        let text = content.as_json_string()?;
        let bytes = self
            .converter
            .convert(&text)
            .map_err(|e| JsonpadError::Spreadsheet(e.to_string()))?;

        let Some(path) = self
            .dialogs
            .choose_save_path(DEFAULT_EXPORT_FILENAME, &["xlsx"])
            .await
        else {
            return Ok(ExportOutcome::Cancelled);
        };

        self.store
            .write_bytes(&path, &bytes)
            .await
            .map_err(|e| JsonpadError::io(e.to_string()))?;
        Ok(ExportOutcome::Exported(path))
    }
}
