//! Extraction use case.
//!
//! Runs the pure field-extraction transform over the active document and
//! opens the result as a new read-only document.

use crate::{SharedSession, persist_session};
use jsonpad_core::document::Document;
use jsonpad_core::error::{JsonpadError, Result};
use jsonpad_core::extract;
use jsonpad_core::repository::SessionRepository;
use std::sync::Arc;

pub struct ExtractUseCase {
    session: SharedSession,
    repository: Arc<dyn SessionRepository>,
}

impl ExtractUseCase {
    pub fn new(session: SharedSession, repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    /// Default field selection for the active document: the first element's
    /// keys when the content is an array of objects, empty otherwise.
    pub async fn default_fields(&self) -> Vec<String> {
        let session = self.session.read().await;
        session
            .active()
            .map(|doc| extract::default_fields(&doc.content))
            .unwrap_or_default()
    }

    /// Extracts the selected fields from the active document into a new
    /// `Extracted {n}` document, created read-only and activated.
    ///
    /// # Errors
    ///
    /// Validation errors (non-array root, malformed text) and capacity
    /// errors leave the session unchanged.
    pub async fn extract(&self, fields: &[String], flatten: bool) -> Result<String> {
        let content = {
            let session = self.session.read().await;
            session
                .active()
                .ok_or_else(|| JsonpadError::internal("no active document"))?
                .content
                .clone()
        };

        let rows = extract::extract(&content, fields, flatten)?;

        let id = {
            let mut session = self.session.write().await;
            let doc = Document::extracted(session.next_extracted_index(), rows);
            session.open(doc)?.id.clone()
        };
        persist_session(&self.session, &self.repository).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::Harness;
    use jsonpad_core::document::DocumentContent;
    use jsonpad_core::session::MAX_OPEN_DOCUMENTS;
    use serde_json::json;

    #[tokio::test]
    async fn test_extract_opens_read_only_result_as_active() {
        let harness = Harness::new();
        let id = harness.session.read().await.active_id.clone();
        harness
            .documents()
            .edit(
                &id,
                DocumentContent::text(r#"[{"a": 1, "b": {"c": 2}}]"#),
            )
            .await
            .unwrap();

        let fields = harness.extracts().default_fields().await;
        assert_eq!(fields, vec!["a", "b"]);

        let new_id = harness.extracts().extract(&fields, true).await.unwrap();

        let session = harness.session.read().await;
        assert_eq!(session.active_id, new_id);
        let doc = session.get(&new_id).unwrap();
        assert_eq!(doc.title, "Extracted 1");
        assert!(doc.read_only);
        assert!(!doc.dirty);
        assert_eq!(
            doc.content,
            DocumentContent::json(json!([{"a": 1, "b.c": 2}]))
        );
    }

    #[tokio::test]
    async fn test_extract_non_array_creates_no_document() {
        let harness = Harness::new();
        let id = harness.session.read().await.active_id.clone();
        harness
            .documents()
            .edit(&id, DocumentContent::text(r#"{"a": 1}"#))
            .await
            .unwrap();

        let err = harness
            .extracts()
            .extract(&["a".to_string()], false)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(harness.session.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_numbers_results_by_prefix_count() {
        let harness = Harness::new();
        let id = harness.session.read().await.active_id.clone();
        harness
            .documents()
            .edit(&id, DocumentContent::text(r#"[{"a": 1}]"#))
            .await
            .unwrap();
        let fields = vec!["a".to_string()];

        harness.documents().activate(&id).await.unwrap();
        harness.extracts().extract(&fields, false).await.unwrap();
        harness.documents().activate(&id).await.unwrap();
        let second = harness.extracts().extract(&fields, false).await.unwrap();

        let session = harness.session.read().await;
        assert_eq!(session.get(&second).unwrap().title, "Extracted 2");
    }

    #[tokio::test]
    async fn test_extract_at_capacity_is_rejected() {
        let harness = Harness::new();
        let docs = harness.documents();
        let id = harness.session.read().await.active_id.clone();
        docs.edit(&id, DocumentContent::text("[{\"a\":1}]"))
            .await
            .unwrap();
        for _ in 1..MAX_OPEN_DOCUMENTS {
            docs.create().await.unwrap();
        }
        docs.activate(&id).await.unwrap();

        let err = harness
            .extracts()
            .extract(&["a".to_string()], false)
            .await
            .unwrap_err();

        assert!(err.is_capacity());
        assert_eq!(harness.session.read().await.len(), MAX_OPEN_DOCUMENTS);
    }
}
