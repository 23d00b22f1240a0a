//! ``src/service/local.rs``
//!
//! # `LocalFileService`: the on-disk collaborator
//!
//! Disks come from `sysinfo`, the three well-known folders from
//! `directories::UserDirs`, and search runs against an in-memory name index
//! built with `walkdir` and published through an `ArcSwap`. Every filesystem
//! walk happens on a blocking task so the controller's runtime never stalls.

use std::{
    collections::HashMap,
    ffi::OsStr,
    fs::{self, Metadata},
    path::{Path, PathBuf},
    sync::Arc,
    time::{Instant, UNIX_EPOCH},
};

use arc_swap::ArcSwap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::{BaseDirs, UserDirs};
use rayon::prelude::*;
use sysinfo::{DiskKind, Disks};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::FileService;
use crate::error::AppError;
use crate::model::entries::{DiskEntry, FileEntry, FileType};

/// Sentinel for entries whose modification time cannot be read.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Where the three listed folders live.
#[derive(Debug, Clone, Default)]
pub struct UserFolders {
    pub downloads: Option<PathBuf>,
    pub documents: Option<PathBuf>,
    pub pictures: Option<PathBuf>,
}

impl UserFolders {
    /// Resolve the platform folders. Downloads falls back to `~/Downloads`.
    #[must_use]
    pub fn detect() -> Self {
        let Some(dirs) = UserDirs::new() else {
            warn!(marker = "USER_DIRS_UNAVAILABLE", "could not resolve user directories");
            return Self::default();
        };

        Self {
            downloads: dirs
                .download_dir()
                .map(Path::to_path_buf)
                .or_else(|| Some(dirs.home_dir().join("Downloads"))),
            documents: dirs.document_dir().map(Path::to_path_buf),
            pictures: dirs.picture_dir().map(Path::to_path_buf),
        }
    }
}

#[derive(Debug)]
struct IndexedFile {
    lower_name: String,
    entry: Arc<FileEntry>,
}

/// Immutable snapshot of the name index.
#[derive(Debug, Default)]
struct FileIndex {
    files: Vec<IndexedFile>,
    /// lower-cased name -> position of the first file with that name
    by_name: HashMap<String, usize>,
}

impl FileIndex {
    fn from_files(files: Vec<IndexedFile>) -> Self {
        let mut by_name = HashMap::with_capacity(files.len());
        for (pos, file) in files.iter().enumerate() {
            by_name.entry(file.lower_name.clone()).or_insert(pos);
        }
        Self { files, by_name }
    }

    fn len(&self) -> usize {
        self.files.len()
    }

    /// `lower_query` must be trimmed and lower-cased.
    fn search(&self, lower_query: &str) -> Vec<FileEntry> {
        if lower_query.is_empty() {
            return Vec::new();
        }
        if let Some(&pos) = self.by_name.get(lower_query) {
            return vec![self.files[pos].entry.as_ref().clone()];
        }
        self.files
            .par_iter()
            .filter(|file| file.lower_name.contains(lower_query))
            .map(|file| file.entry.as_ref().clone())
            .collect()
    }
}

pub struct LocalFileService {
    folders: UserFolders,
    index_roots: Vec<PathBuf>,
    index: ArcSwap<FileIndex>,
}

impl LocalFileService {
    /// Service over the platform folders. Empty `index_roots` means the
    /// home directory.
    #[must_use]
    pub fn new(index_roots: Vec<PathBuf>) -> Self {
        Self::with_folders(UserFolders::detect(), index_roots)
    }

    #[must_use]
    pub fn with_folders(folders: UserFolders, index_roots: Vec<PathBuf>) -> Self {
        Self {
            folders,
            index_roots,
            index: ArcSwap::from_pointee(FileIndex::default()),
        }
    }

    /// Number of files in the current index snapshot.
    #[must_use]
    pub fn indexed_files(&self) -> usize {
        self.index.load().len()
    }

    fn roots(&self) -> Vec<PathBuf> {
        if !self.index_roots.is_empty() {
            return self.index_roots.clone();
        }
        BaseDirs::new()
            .map(|dirs| vec![dirs.home_dir().to_path_buf()])
            .unwrap_or_default()
    }

    async fn list_folder(&self, label: &'static str, dir: Option<PathBuf>) -> Result<Vec<FileEntry>, AppError> {
        let dir = dir.ok_or_else(|| {
            AppError::service(
                format!("list_{}", label.to_lowercase()),
                format!("Could not determine {label} directory"),
            )
        })?;
        tokio::task::spawn_blocking(move || read_folder(label, &dir)).await?
    }
}

#[async_trait]
impl FileService for LocalFileService {
    async fn list_disks(&self) -> Result<Vec<DiskEntry>, AppError> {
        let disks = tokio::task::spawn_blocking(|| {
            Disks::new_with_refreshed_list()
                .list()
                .iter()
                .map(|disk| {
                    let name = disk.name().to_string_lossy();
                    let name = if name.is_empty() {
                        disk.mount_point().display().to_string()
                    } else {
                        name.into_owned()
                    };
                    DiskEntry::new(
                        name,
                        disk_kind_label(disk.kind()),
                        disk.total_space(),
                        disk.available_space(),
                    )
                })
                .collect::<Vec<_>>()
        })
        .await?;

        debug!(marker = "DISKS_LISTED", count = disks.len(), "disks enumerated");
        Ok(disks)
    }

    async fn list_downloads(&self) -> Result<Vec<FileEntry>, AppError> {
        self.list_folder("Downloads", self.folders.downloads.clone()).await
    }

    async fn list_documents(&self) -> Result<Vec<FileEntry>, AppError> {
        self.list_folder("Documents", self.folders.documents.clone()).await
    }

    async fn list_pictures(&self) -> Result<Vec<FileEntry>, AppError> {
        self.list_folder("Pictures", self.folders.pictures.clone()).await
    }

    async fn build_index(&self) -> Result<(), AppError> {
        let roots = self.roots();
        if roots.is_empty() {
            return Err(AppError::service("build_index", "no index roots and no home directory"));
        }

        let start = Instant::now();
        let index = tokio::task::spawn_blocking(move || index_roots(&roots)).await?;
        let count = index.len();
        self.index.store(Arc::new(index));

        info!(
            marker = "INDEX_BUILT",
            operation_type = "build_index",
            files = count,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "file index rebuilt"
        );
        Ok(())
    }

    async fn search_files(&self, query: &str) -> Result<Vec<FileEntry>, AppError> {
        let lower_query = query.trim().to_lowercase();
        if lower_query.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.index.load_full();
        tokio::task::spawn_blocking(move || snapshot.search(&lower_query))
            .await
            .map_err(|e| AppError::search_failed(query, e.to_string()))
    }
}

fn disk_kind_label(kind: DiskKind) -> &'static str {
    match kind {
        DiskKind::HDD => "HDD",
        DiskKind::SSD => "SSD",
        DiskKind::Unknown(_) => "Unknown",
    }
}

/// Seconds-precision RFC 3339 timestamp of the last modification.
fn modification_date(meta: &Metadata) -> String {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| DateTime::<Utc>::from_timestamp(i64::try_from(d.as_secs()).ok()?, 0))
        .map_or_else(|| UNKNOWN_DATE.to_string(), |dt| dt.to_rfc3339())
}

fn file_type_of(meta: &Metadata) -> FileType {
    let ft = meta.file_type();
    if ft.is_dir() {
        FileType::Directory
    } else if ft.is_file() {
        FileType::File
    } else if ft.is_symlink() {
        FileType::Symlink
    } else {
        FileType::Unknown
    }
}

/// Recursive sum of regular file sizes under `dir`; unreadable entries are skipped.
fn directory_size(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("")
        .to_string()
}

/// One level of `dir`. Entries whose metadata cannot be read are skipped.
fn read_folder(label: &str, dir: &Path) -> Result<Vec<FileEntry>, AppError> {
    if !dir.is_dir() {
        return Err(AppError::folder_unavailable(label, dir));
    }

    let read_dir = fs::read_dir(dir).map_err(|e| {
        AppError::service(
            format!("list_{}", label.to_lowercase()),
            format!("Failed to read {label} folder: {e}"),
        )
    })?;

    let mut entries = Vec::new();
    for entry in read_dir.filter_map(Result::ok) {
        let path = entry.path();
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                debug!("skipping {:?}: {}", path, e);
                continue;
            }
        };

        let file_type = file_type_of(&meta);
        let size = if file_type == FileType::Directory {
            directory_size(&path)
        } else {
            meta.len()
        };

        entries.push(FileEntry::new(
            entry_name(&path),
            path.display().to_string(),
            size,
            modification_date(&meta),
            file_type,
        ));
    }

    debug!(
        marker = "FOLDER_LISTED",
        folder = label,
        count = entries.len(),
        "folder listed"
    );
    Ok(entries)
}

fn index_roots(roots: &[PathBuf]) -> FileIndex {
    let mut found = Vec::new();
    for root in roots {
        let before = found.len();
        found.extend(
            WalkDir::new(root)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file()),
        );
        debug!("indexed {} files under {:?}", found.len() - before, root);
    }

    let files: Vec<IndexedFile> = found
        .par_iter()
        .filter_map(|e| {
            let path = e.path();
            let name = path.file_name()?.to_str()?.to_string();
            let meta = e.metadata().ok()?;
            Some(IndexedFile {
                lower_name: name.to_lowercase(),
                entry: Arc::new(FileEntry::new(
                    name,
                    path.display().to_string(),
                    meta.len(),
                    modification_date(&meta),
                    FileType::File,
                )),
            })
        })
        .collect();

    FileIndex::from_files(files)
}
