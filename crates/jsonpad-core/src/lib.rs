//! jsonpad core domain.
//!
//! Pure domain logic for the multi-document JSON editing session: the
//! [`Document`] model, the [`Session`] state machine, the field-extraction
//! transform, and the port traits the application layer injects
//! implementations for.

pub mod document;
pub mod error;
pub mod extract;
pub mod ports;
pub mod repository;
pub mod session;

// Re-export common types
pub use document::{Document, DocumentContent, EXTRACTED_PREFIX, UNTITLED_PREFIX};
pub use error::JsonpadError;
pub use ports::{DialogService, DocumentStore, SpreadsheetConverter};
pub use repository::SessionRepository;
pub use session::{MAX_OPEN_DOCUMENTS, Session};
