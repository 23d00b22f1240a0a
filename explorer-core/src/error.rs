//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Explorer Controller
//!
//! One enum for every failure the controller and its collaborators can
//! report. Collaborator failures carry the operation name so the log line
//! tells which slot or query went wrong; `user_message` renders the only
//! error a user ever sees (the search banner).

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all explorer operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A well-known user directory (Downloads, Documents, ...) is unavailable.
    #[error("{folder} folder not found or invalid: {path:?}")]
    FolderUnavailable { folder: String, path: PathBuf },

    /// A collaborator call (`list_disks`, `build_index`, ...) failed.
    #[error("Service call '{operation}' failed: {reason}")]
    Service { operation: String, reason: String },

    /// The index service rejected or failed a query.
    #[error("Search for '{query}' failed: {reason}")]
    SearchFailed { query: String, reason: String },

    /// Background task panicked or was aborted before reporting.
    #[error("Task {task} failed: {reason}")]
    TaskFailed { task: String, reason: String },

    /// Operation cancelled by user or system.
    #[error("Operation was cancelled")]
    Cancelled,
}

impl AppError {
    /// Create a collaborator failure error
    pub fn service<S1: Into<String>, S2: Into<String>>(operation: S1, reason: S2) -> Self {
        Self::Service {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a search failure error
    pub fn search_failed<S1: Into<String>, S2: Into<String>>(query: S1, reason: S2) -> Self {
        Self::SearchFailed {
            query: query.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-folder error
    pub fn folder_unavailable<S: Into<String>, P: Into<PathBuf>>(folder: S, path: P) -> Self {
        Self::FolderUnavailable {
            folder: folder.into(),
            path: path.into(),
        }
    }

    /// Create a task failure error
    pub fn task_failed<S1: Into<String>, S2: Into<String>>(task: S1, reason: S2) -> Self {
        Self::TaskFailed {
            task: task.into(),
            reason: reason.into(),
        }
    }

    /// Banner text shown in place of the search results.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::SearchFailed { reason, .. } => format!("Search failed: {reason}"),
            Self::Service { reason, .. } | Self::TaskFailed { reason, .. } => {
                format!("Search failed: {reason}")
            }
            Self::Cancelled => "Search was cancelled".to_string(),
            other => format!("Search failed: {other}"),
        }
    }
}

// Manual Clone implementation to handle non-Clone fields
impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            Self::Io(e) => Self::Io(io::Error::new(e.kind(), e.to_string())),
            Self::FolderUnavailable { folder, path } => Self::FolderUnavailable {
                folder: folder.clone(),
                path: path.clone(),
            },
            Self::Service { operation, reason } => Self::Service {
                operation: operation.clone(),
                reason: reason.clone(),
            },
            Self::SearchFailed { query, reason } => Self::SearchFailed {
                query: query.clone(),
                reason: reason.clone(),
            },
            Self::TaskFailed { task, reason } => Self::TaskFailed {
                task: task.clone(),
                reason: reason.clone(),
            },
            Self::Cancelled => Self::Cancelled,
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        if e.is_cancelled() {
            Self::Cancelled
        } else {
            Self::task_failed("blocking", e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_failure_banner_names_reason() {
        let err = AppError::search_failed("report", "index offline");
        assert_eq!(err.user_message(), "Search failed: index offline");
    }

    #[test]
    fn every_variant_clones_into_itself() {
        let errors = [
            AppError::folder_unavailable("Downloads", "/home/u/Downloads"),
            AppError::service("list_disks", "boom"),
            AppError::search_failed("q", "offline"),
            AppError::task_failed("blocking", "panicked"),
            AppError::Cancelled,
        ];
        for err in errors {
            assert_eq!(err.clone().to_string(), err.to_string());
        }
    }

    #[test]
    fn clone_preserves_io_kind() {
        let err = AppError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        match err.clone() {
            AppError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("unexpected clone: {other:?}"),
        }
    }
}
