//! Shared mock ports for use-case tests.

use crate::command::CommandDispatcher;
use crate::document_usecase::DocumentUseCase;
use crate::export_usecase::ExportUseCase;
use crate::extract_usecase::ExtractUseCase;
use crate::save_usecase::SaveUseCase;
use crate::SharedSession;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use jsonpad_core::document::Document;
use jsonpad_core::ports::{DialogService, DocumentStore, SpreadsheetConverter};
use jsonpad_core::repository::SessionRepository;
use jsonpad_core::session::Session;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// In-memory session repository; shared across harnesses to simulate a
/// process restart.
#[derive(Default)]
pub(crate) struct MockRepository {
    documents: Mutex<Option<Vec<Document>>>,
    active_id: Mutex<Option<String>>,
    document_saves: AtomicUsize,
    active_saves: AtomicUsize,
    fail_loads: AtomicBool,
}

impl MockRepository {
    pub fn fail_loads(&self) {
        self.fail_loads.store(true, Ordering::SeqCst);
    }

    pub fn document_saves(&self) -> usize {
        self.document_saves.load(Ordering::SeqCst)
    }

    pub fn active_saves(&self) -> usize {
        self.active_saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRepository for MockRepository {
    async fn load_documents(&self) -> Result<Option<Vec<Document>>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(anyhow!("stored state unreadable"));
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn save_documents(&self, documents: &[Document]) -> Result<()> {
        self.document_saves.fetch_add(1, Ordering::SeqCst);
        *self.documents.lock().unwrap() = Some(documents.to_vec());
        Ok(())
    }

    async fn load_active_id(&self) -> Result<Option<String>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(anyhow!("stored state unreadable"));
        }
        Ok(self.active_id.lock().unwrap().clone())
    }

    async fn save_active_id(&self, id: &str) -> Result<()> {
        self.active_saves.fetch_add(1, Ordering::SeqCst);
        *self.active_id.lock().unwrap() = Some(id.to_string());
        Ok(())
    }
}

/// Scripted dialog responses plus a record of everything shown.
pub(crate) struct MockDialogs {
    confirm_response: AtomicBool,
    input_response: Mutex<Option<String>>,
    path_response: Mutex<Option<PathBuf>>,
    confirm_calls: Mutex<Vec<(String, String)>>,
    input_calls: Mutex<Vec<String>>,
    path_calls: Mutex<Vec<String>>,
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl Default for MockDialogs {
    fn default() -> Self {
        Self {
            confirm_response: AtomicBool::new(true),
            input_response: Mutex::new(Some("untitled".to_string())),
            path_response: Mutex::new(Some(PathBuf::from("/chosen/out.json"))),
            confirm_calls: Mutex::default(),
            input_calls: Mutex::default(),
            path_calls: Mutex::default(),
            infos: Mutex::default(),
            warnings: Mutex::default(),
            errors: Mutex::default(),
        }
    }
}

impl MockDialogs {
    pub fn decline_confirms(&self) {
        self.confirm_response.store(false, Ordering::SeqCst);
    }

    pub fn set_input_response(&self, response: Option<&str>) {
        *self.input_response.lock().unwrap() = response.map(str::to_string);
    }

    pub fn set_path_response(&self, response: Option<&str>) {
        *self.path_response.lock().unwrap() = response.map(PathBuf::from);
    }

    pub fn confirm_calls(&self) -> Vec<(String, String)> {
        self.confirm_calls.lock().unwrap().clone()
    }

    pub fn input_calls(&self) -> Vec<String> {
        self.input_calls.lock().unwrap().clone()
    }

    pub fn path_calls(&self) -> Vec<String> {
        self.path_calls.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl DialogService for MockDialogs {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        self.confirm_calls
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        self.confirm_response.load(Ordering::SeqCst)
    }

    async fn prompt_input(&self, _title: &str, default: &str) -> Option<String> {
        self.input_calls.lock().unwrap().push(default.to_string());
        self.input_response.lock().unwrap().clone()
    }

    async fn choose_save_path(
        &self,
        default_filename: &str,
        _extensions: &[&str],
    ) -> Option<PathBuf> {
        self.path_calls
            .lock()
            .unwrap()
            .push(default_filename.to_string());
        self.path_response.lock().unwrap().clone()
    }

    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Records writes instead of touching the file system.
#[derive(Default)]
pub(crate) struct MockStore {
    cache_calls: Mutex<Vec<(String, String)>>,
    path_calls: Mutex<Vec<(PathBuf, String)>>,
    byte_calls: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    fail_writes: AtomicBool,
}

impl MockStore {
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn cache_calls(&self) -> Vec<(String, String)> {
        self.cache_calls.lock().unwrap().clone()
    }

    pub fn path_calls(&self) -> Vec<(PathBuf, String)> {
        self.path_calls.lock().unwrap().clone()
    }

    pub fn byte_calls(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.byte_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn save_to_cache(&self, document_id: &str, content: &str) -> Result<PathBuf> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("disk full"));
        }
        self.cache_calls
            .lock()
            .unwrap()
            .push((document_id.to_string(), content.to_string()));
        Ok(PathBuf::from(format!("/cache/{}.json", document_id)))
    }

    async fn save_to_path(&self, path: &Path, content: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("disk full"));
        }
        self.path_calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("disk full"));
        }
        self.byte_calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}

/// Returns canned bytes and records the input text.
#[derive(Default)]
pub(crate) struct MockConverter {
    calls: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MockConverter {
    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SpreadsheetConverter for MockConverter {
    fn convert(&self, json_text: &str) -> Result<Vec<u8>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("conversion failed"));
        }
        self.calls.lock().unwrap().push(json_text.to_string());
        Ok(b"PK mock workbook".to_vec())
    }
}

/// Bundles a fresh session with one mock of every port.
pub(crate) struct Harness {
    pub session: SharedSession,
    pub repository: Arc<MockRepository>,
    pub dialogs: Arc<MockDialogs>,
    pub store: Arc<MockStore>,
    pub converter: Arc<MockConverter>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_repository(Arc::new(MockRepository::default()))
    }

    pub fn with_repository(repository: Arc<MockRepository>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::fresh())),
            repository,
            dialogs: Arc::new(MockDialogs::default()),
            store: Arc::new(MockStore::default()),
            converter: Arc::new(MockConverter::default()),
        }
    }

    pub fn documents(&self) -> DocumentUseCase {
        DocumentUseCase::new(
            self.session.clone(),
            self.repository.clone(),
            self.dialogs.clone(),
        )
    }

    pub fn saves(&self) -> SaveUseCase {
        SaveUseCase::new(
            self.session.clone(),
            self.repository.clone(),
            self.store.clone(),
            self.dialogs.clone(),
        )
    }

    pub fn extracts(&self) -> ExtractUseCase {
        ExtractUseCase::new(self.session.clone(), self.repository.clone())
    }

    pub fn exports(&self) -> ExportUseCase {
        ExportUseCase::new(
            self.session.clone(),
            self.store.clone(),
            self.converter.clone(),
            self.dialogs.clone(),
        )
    }

    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::new(
            self.session.clone(),
            self.repository.clone(),
            self.store.clone(),
            self.converter.clone(),
            self.dialogs.clone(),
        )
    }
}
