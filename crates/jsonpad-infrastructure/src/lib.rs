//! jsonpad infrastructure.
//!
//! File-backed implementations of the core's ports: session persistence,
//! document byte storage, and spreadsheet conversion.

pub mod document_store;
pub mod paths;
pub mod session_repository;
pub mod spreadsheet;

pub use document_store::FsDocumentStore;
pub use paths::JsonpadPaths;
pub use session_repository::FileSessionRepository;
pub use spreadsheet::XlsxConverter;
