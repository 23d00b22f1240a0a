//! The file/index service the controller talks to.
//!
//! Everything behind this trait is opaque to the controller: how disks are
//! enumerated, how folders are read, how the index is built and queried.

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::dataset_store::FetchPayload;
use crate::model::entries::{DiskEntry, FileEntry, Section};

pub mod local;
pub use local::LocalFileService;

#[cfg(test)]
pub(crate) mod scripted;

#[async_trait]
pub trait FileService: Send + Sync {
    async fn list_disks(&self) -> Result<Vec<DiskEntry>, AppError>;

    async fn list_downloads(&self) -> Result<Vec<FileEntry>, AppError>;

    async fn list_documents(&self) -> Result<Vec<FileEntry>, AppError>;

    async fn list_pictures(&self) -> Result<Vec<FileEntry>, AppError>;

    /// (Re)build the name index. Callers treat failure as non-fatal.
    async fn build_index(&self) -> Result<(), AppError>;

    /// Name-substring query. Hits must carry `file_path`.
    async fn search_files(&self, query: &str) -> Result<Vec<FileEntry>, AppError>;
}

/// Route a section to the listing call that fills it.
pub async fn fetch_section(
    service: &dyn FileService,
    section: Section,
) -> Result<FetchPayload, AppError> {
    match section {
        Section::Disks => service.list_disks().await.map(FetchPayload::Disks),
        Section::Downloads => service.list_downloads().await.map(FetchPayload::Files),
        Section::Documents => service.list_documents().await.map(FetchPayload::Files),
        Section::Pictures => service.list_pictures().await.map(FetchPayload::Files),
    }
}
