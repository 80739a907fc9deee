//! Error taxonomy for summary generation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Errors that abort a summary section or the final write.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {path:?}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SummaryError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn list(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::List {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// A recovered failure that degraded the report without aborting it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryWarning {
    /// Coverage CSV could not be read; the coverage section is omitted.
    CoverageUnreadable { path: PathBuf, reason: String },

    /// Coverage CSV had no usable data row; the coverage section is omitted.
    CoverageMalformed { path: PathBuf, reason: String },

    /// An artifact's size could not be read; it is listed without a size.
    ArtifactSizeUnavailable { path: PathBuf, reason: String },

    /// An entry under the package directory could not be visited.
    ArtifactWalkFailed { path: PathBuf, reason: String },
}

impl SummaryWarning {
    /// Path the warning refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            SummaryWarning::CoverageUnreadable { path, .. }
            | SummaryWarning::CoverageMalformed { path, .. }
            | SummaryWarning::ArtifactSizeUnavailable { path, .. }
            | SummaryWarning::ArtifactWalkFailed { path, .. } => path,
        }
    }

    /// Human-readable reason.
    pub fn reason(&self) -> &str {
        match self {
            SummaryWarning::CoverageUnreadable { reason, .. }
            | SummaryWarning::CoverageMalformed { reason, .. }
            | SummaryWarning::ArtifactSizeUnavailable { reason, .. }
            | SummaryWarning::ArtifactWalkFailed { reason, .. } => reason,
        }
    }
}
