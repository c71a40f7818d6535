//! Error types for the jsonpad application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire jsonpad application.
///
/// Variants map to the failure classes the session core distinguishes:
/// validation failures abort an operation with no state change, IO failures
/// leave the dirty flag set so the user can retry, and capacity failures
/// reject the operation with a warning.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JsonpadError {
    /// Referenced document does not exist in the session
    #[error("Document not found: '{id}'")]
    NotFound { id: String },

    /// IO error (cache, explicit-path, or export writes)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Content is not syntactically valid JSON
    #[error("Invalid JSON: {message}")]
    Json { message: String },

    /// Content parses but has the wrong shape for the operation
    #[error("{0}")]
    Format(String),

    /// Document has no content to operate on
    #[error("Nothing to save")]
    EmptyContent,

    /// Open-document limit reached
    #[error("Cannot open more than {limit} documents")]
    Capacity { limit: usize },

    /// Spreadsheet conversion failure
    #[error("Spreadsheet conversion failed: {0}")]
    Spreadsheet(String),

    /// Persisted-state serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JsonpadError {
    /// Creates a NotFound error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an invalid-JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// Creates a Format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error aborts an operation before any state change
    /// (malformed JSON, wrong shape, or missing content).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Json { .. } | Self::Format(_) | Self::EmptyContent
        )
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a capacity error
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::Capacity { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for JsonpadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for JsonpadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, JsonpadError>`.
pub type Result<T> = std::result::Result<T, JsonpadError>;
