use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single item could not be saved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("catalog page unreachable: {0}")]
    CatalogUnreachable(String),

    #[error("catalog page returned status {0}")]
    CatalogStatus(u16),

    #[error("no link for formats [{}]", .formats.join(", "))]
    LinkNotFound { formats: Vec<String> },

    #[error("file download from {url} failed: {reason}")]
    FileUnreachable { url: String, reason: String },

    #[error("failed to write {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::CatalogUnreachable(_) => FailureKind::CatalogUnreachable,
            FetchError::CatalogStatus(_) => FailureKind::CatalogStatus,
            FetchError::LinkNotFound { .. } => FailureKind::LinkNotFound,
            FetchError::FileUnreachable { .. } => FailureKind::FileUnreachable,
            FetchError::FileWrite { .. } => FailureKind::FileWrite,
        }
    }
}

/// Error classes tallied separately in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    CatalogUnreachable,
    CatalogStatus,
    LinkNotFound,
    FileUnreachable,
    FileWrite,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::CatalogUnreachable => "catalog unreachable",
            FailureKind::CatalogStatus => "catalog status",
            FailureKind::LinkNotFound => "no matching link",
            FailureKind::FileUnreachable => "file unreachable",
            FailureKind::FileWrite => "file write",
        }
    }
}

/// Terminal result of processing one identifier.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// This run fetched and wrote the file.
    Saved { path: PathBuf, bytes: u64 },
    /// A file for one of the requested formats was already on disk.
    AlreadyExists { path: PathBuf },
    Failed(FetchError),
}

impl DownloadOutcome {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            DownloadOutcome::Saved { path, .. } | DownloadOutcome::AlreadyExists { path } => Some(path),
            DownloadOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            DownloadOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}
