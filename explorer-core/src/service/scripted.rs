//! In-memory `FileService` for controller tests: canned answers, a call log,
//! and optional per-query gates to control settlement order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::FileService;
use crate::error::AppError;
use crate::model::entries::{DiskEntry, FileEntry, FileType};

#[derive(Default)]
pub(crate) struct ScriptedService {
    calls: Mutex<Vec<String>>,
    searches: Mutex<Vec<String>>,
    hits: Mutex<HashMap<String, Result<Vec<FileEntry>, AppError>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    disks: Mutex<Option<Result<Vec<DiskEntry>, AppError>>>,
    files: Mutex<HashMap<&'static str, Result<Vec<FileEntry>, AppError>>>,
    index: Mutex<Option<AppError>>,
}

pub(crate) fn hit(name: &str) -> FileEntry {
    FileEntry::new(name, format!("/data/{name}"), 42, "Unknown", FileType::File)
}

impl ScriptedService {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn answer(&self, query: &str, result: Result<Vec<FileEntry>, AppError>) {
        self.hits.lock().unwrap().insert(query.to_string(), result);
    }

    /// Hold `query`'s response until `release` is called.
    pub(crate) fn gate(&self, query: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(query.to_string(), Arc::new(Notify::new()));
    }

    pub(crate) fn release(&self, query: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(query) {
            gate.notify_one();
        }
    }

    pub(crate) fn set_disks(&self, result: Result<Vec<DiskEntry>, AppError>) {
        *self.disks.lock().unwrap() = Some(result);
    }

    pub(crate) fn set_files(&self, operation: &'static str, result: Result<Vec<FileEntry>, AppError>) {
        self.files.lock().unwrap().insert(operation, result);
    }

    pub(crate) fn fail_index(&self, err: AppError) {
        *self.index.lock().unwrap() = Some(err);
    }

    pub(crate) fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &str) {
        self.calls.lock().unwrap().push(operation.to_string());
    }

    fn files_for(&self, operation: &'static str) -> Result<Vec<FileEntry>, AppError> {
        self.record(operation);
        self.files
            .lock()
            .unwrap()
            .get(operation)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl FileService for ScriptedService {
    async fn list_disks(&self) -> Result<Vec<DiskEntry>, AppError> {
        self.record("list_disks");
        self.disks.lock().unwrap().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_downloads(&self) -> Result<Vec<FileEntry>, AppError> {
        self.files_for("list_downloads")
    }

    async fn list_documents(&self) -> Result<Vec<FileEntry>, AppError> {
        self.files_for("list_documents")
    }

    async fn list_pictures(&self) -> Result<Vec<FileEntry>, AppError> {
        self.files_for("list_pictures")
    }

    async fn build_index(&self) -> Result<(), AppError> {
        self.record("build_index");
        match self.index.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn search_files(&self, query: &str) -> Result<Vec<FileEntry>, AppError> {
        self.searches.lock().unwrap().push(query.to_string());

        let gate = self.gates.lock().unwrap().get(query).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.hits
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
