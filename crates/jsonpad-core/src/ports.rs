//! Collaborator ports consumed by the use cases.
//!
//! The editor shell, native dialogs, the file system, and the spreadsheet
//! encoder are external collaborators. The core never depends on their
//! concrete implementations; it talks to these narrow traits.

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// User-facing dialog and notification surface.
///
/// Confirmations and file/name prompts suspend the calling operation until
/// the user answers; the message sinks are fire-and-forget.
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Asks a yes/no question. `false` means the user declined.
    async fn confirm(&self, title: &str, message: &str) -> bool;

    /// Asks for a one-line text input, pre-filled with `default`.
    /// `None` means the user cancelled.
    async fn prompt_input(&self, title: &str, default: &str) -> Option<String>;

    /// Opens a save-destination chooser filtered to the given extensions,
    /// with the filename field pre-filled. `None` means the user cancelled.
    async fn choose_save_path(&self, default_filename: &str, extensions: &[&str])
    -> Option<PathBuf>;

    /// Shows an informational message.
    fn info(&self, message: &str);

    /// Shows a warning message.
    fn warn(&self, message: &str);

    /// Shows an error message.
    fn error(&self, message: &str);
}

/// Byte-level document destinations: the per-document cache and explicit
/// user-chosen paths.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes content to the per-document cache slot and returns the
    /// destination path. Overwrite semantics are per-id, not per-path.
    async fn save_to_cache(&self, document_id: &str, content: &str) -> Result<PathBuf>;

    /// Writes content to an explicit path.
    async fn save_to_path(&self, path: &Path, content: &str) -> Result<()>;

    /// Writes raw bytes to an explicit path.
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Converts a JSON source string into a spreadsheet byte stream.
pub trait SpreadsheetConverter: Send + Sync {
    fn convert(&self, json_text: &str) -> Result<Vec<u8>>;
}
