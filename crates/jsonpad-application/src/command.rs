//! Command table.
//!
//! Symbolic commands decouple the input surface (native menu, keyboard
//! shortcuts, context menu) from the use cases. The shell translates its
//! events into [`Command`] values and feeds them to the dispatcher; errors
//! are reported through the dialog port and never escape a dispatch.

use crate::document_usecase::DocumentUseCase;
use crate::export_usecase::{ExportOutcome, ExportUseCase};
use crate::extract_usecase::ExtractUseCase;
use crate::save_usecase::{SaveOutcome, SaveUseCase};
use crate::SharedSession;
use jsonpad_core::document::DocumentContent;
use jsonpad_core::error::{JsonpadError, Result};
use jsonpad_core::ports::{DialogService, DocumentStore, SpreadsheetConverter};
use jsonpad_core::repository::SessionRepository;
use jsonpad_core::session::Session;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Menu identifiers emitted by the shell.
pub const MENU_FILE_SAVE: &str = "file-save";
pub const MENU_FILE_SAVE_AS: &str = "file-save-as";
pub const MENU_TOOLS_EXTRACT: &str = "tools-extract";
pub const MENU_TOOLS_EXPORT: &str = "tools-json-to-excel";

/// A symbolic editor command, independent of the input surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum Command {
    New,
    Duplicate { id: String },
    Rename { id: String, title: String },
    ToggleReadOnly { id: String },
    Close { id: String },
    CloseOthers { id: String },
    CloseAll,
    Activate { id: String },
    Reorder { from: String, to: String },
    Edit { id: String, content: DocumentContent },
    Save,
    SaveAs,
    /// Opens the extraction dialog: resolves the default field selection.
    OpenExtract,
    Extract { fields: Vec<String>, flatten: bool },
    ExportSpreadsheet,
}

impl Command {
    /// Maps a shell menu identifier onto a command. Unknown ids are ignored.
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            MENU_FILE_SAVE => Some(Self::Save),
            MENU_FILE_SAVE_AS => Some(Self::SaveAs),
            MENU_TOOLS_EXTRACT => Some(Self::OpenExtract),
            MENU_TOOLS_EXPORT => Some(Self::ExportSpreadsheet),
            _ => None,
        }
    }

    /// Keyboard accelerator the shell registers for this command.
    pub fn accelerator(&self) -> Option<&'static str> {
        match self {
            Self::Save => Some("CmdOrCtrl+S"),
            Self::SaveAs => Some("Shift+CmdOrCtrl+S"),
            Self::OpenExtract => Some("Shift+CmdOrCtrl+F"),
            Self::ExportSpreadsheet => Some("CmdOrCtrl+E"),
            _ => None,
        }
    }
}

/// What a dispatched command did. `Saved(None)` / `Exported(None)` mean the
/// user cancelled; `Failed` carries an already-reported error.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Done,
    DocumentOpened(String),
    Closed(bool),
    Saved(Option<PathBuf>),
    FieldSelection(Vec<String>),
    Extracted(String),
    Exported(Option<PathBuf>),
    Failed(JsonpadError),
}

/// Routes commands to the use cases and reports failures to the user.
pub struct CommandDispatcher {
    session: SharedSession,
    documents: DocumentUseCase,
    saves: SaveUseCase,
    extracts: ExtractUseCase,
    exports: ExportUseCase,
    dialogs: Arc<dyn DialogService>,
}

impl CommandDispatcher {
    pub fn new(
        session: SharedSession,
        repository: Arc<dyn SessionRepository>,
        store: Arc<dyn DocumentStore>,
        converter: Arc<dyn SpreadsheetConverter>,
        dialogs: Arc<dyn DialogService>,
    ) -> Self {
        Self {
            documents: DocumentUseCase::new(
                session.clone(),
                repository.clone(),
                dialogs.clone(),
            ),
            saves: SaveUseCase::new(
                session.clone(),
                repository.clone(),
                store.clone(),
                dialogs.clone(),
            ),
            extracts: ExtractUseCase::new(session.clone(), repository),
            exports: ExportUseCase::new(session.clone(), store, converter, dialogs.clone()),
            session,
            dialogs,
        }
    }

    /// Creates a dispatcher and restores the persisted session into it.
    pub async fn bootstrap(
        repository: Arc<dyn SessionRepository>,
        store: Arc<dyn DocumentStore>,
        converter: Arc<dyn SpreadsheetConverter>,
        dialogs: Arc<dyn DialogService>,
    ) -> Self {
        let session: SharedSession = Arc::new(RwLock::new(Session::fresh()));
        let dispatcher = Self::new(session, repository, store, converter, dialogs);
        dispatcher.documents.restore().await;
        dispatcher
    }

    /// The shared session, for shells that render from it.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Executes a command. Failures are reported through the dialog port
    /// (capacity as a warning, everything else as an error) and returned as
    /// [`CommandOutcome::Failed`]; nothing is fatal.
    pub async fn dispatch(&self, command: Command) -> CommandOutcome {
        tracing::debug!("Dispatching {:?}", command);
        match self.run(command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_capacity() {
                    self.dialogs.warn(&e.to_string());
                } else {
                    self.dialogs.error(&e.to_string());
                }
                CommandOutcome::Failed(e)
            }
        }
    }

    async fn run(&self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::New => Ok(CommandOutcome::DocumentOpened(
                self.documents.create().await?,
            )),
            Command::Duplicate { id } => Ok(CommandOutcome::DocumentOpened(
                self.documents.duplicate(&id).await?,
            )),
            Command::Rename { id, title } => {
                self.documents.rename(&id, &title).await?;
                Ok(CommandOutcome::Done)
            }
            Command::ToggleReadOnly { id } => {
                self.documents.toggle_read_only(&id).await?;
                Ok(CommandOutcome::Done)
            }
            Command::Close { id } => {
                Ok(CommandOutcome::Closed(self.documents.close(&id).await?))
            }
            Command::CloseOthers { id } => Ok(CommandOutcome::Closed(
                self.documents.close_others(&id).await?,
            )),
            Command::CloseAll => Ok(CommandOutcome::Closed(self.documents.close_all().await?)),
            Command::Activate { id } => {
                self.documents.activate(&id).await?;
                Ok(CommandOutcome::Done)
            }
            Command::Reorder { from, to } => {
                self.documents.reorder(&from, &to).await?;
                Ok(CommandOutcome::Done)
            }
            Command::Edit { id, content } => {
                self.documents.edit(&id, content).await?;
                Ok(CommandOutcome::Done)
            }
            Command::Save => Ok(self.saved(self.saves.save().await?)),
            Command::SaveAs => Ok(self.saved(self.saves.save_as().await?)),
            Command::OpenExtract => Ok(CommandOutcome::FieldSelection(
                self.extracts.default_fields().await,
            )),
            Command::Extract { fields, flatten } => Ok(CommandOutcome::Extracted(
                self.extracts.extract(&fields, flatten).await?,
            )),
            Command::ExportSpreadsheet => match self.exports.export().await? {
                ExportOutcome::Exported(path) => {
                    self.dialogs
                        .info(&format!("Exported to {}", path.display()));
                    Ok(CommandOutcome::Exported(Some(path)))
                }
                ExportOutcome::Cancelled => Ok(CommandOutcome::Exported(None)),
            },
        }
    }

    fn saved(&self, outcome: SaveOutcome) -> CommandOutcome {
        match outcome {
            SaveOutcome::Saved(path) => {
                self.dialogs.info(&format!("Saved to {}", path.display()));
                CommandOutcome::Saved(Some(path))
            }
            SaveOutcome::Cancelled => CommandOutcome::Saved(None),
        }
    }
}
