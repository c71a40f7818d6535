//! Unified path management for jsonpad state files.
//!
//! All persisted session state and cache saves live under a single per-user
//! application directory.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for jsonpad.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/jsonpad/           # Config directory
/// ├── documents.json           # Persisted document list
/// ├── active_document.txt      # Persisted active document id
/// └── cache/                   # Per-document cache saves
///     └── <document-id>.json
/// ```
pub struct JsonpadPaths;

impl JsonpadPaths {
    /// Returns the jsonpad configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/jsonpad/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("jsonpad"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the per-document cache directory.
    pub fn cache_dir() -> Result<PathBuf, PathError> {
        Self::config_dir().map(|dir| dir.join("cache"))
    }
}
