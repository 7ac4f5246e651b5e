//! Import lifecycle state
//!
//! The download reference and working directory only exist once an import has
//! succeeded, so they live inside the `Imported` variant rather than as
//! nullable fields on the project.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a project is in its import lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ImportState {
    /// Import requested, pipeline not finished
    #[default]
    Pending,
    /// Repository archived and uploaded
    Imported {
        /// Blob store reference of the uploaded archive
        download_url: String,
        /// Scratch directory the repository was cloned into (may be stale)
        working_directory: PathBuf,
    },
    /// Import pipeline failed
    Failed {
        /// Why the import failed
        reason: String,
    },
}

impl ImportState {
    /// Short lowercase label for this state
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Imported { .. } => "imported",
            Self::Failed { .. } => "failed",
        }
    }

    /// Blob store reference, only set when imported
    #[must_use]
    pub fn download_url(&self) -> Option<&str> {
        match self {
            Self::Imported { download_url, .. } => Some(download_url),
            _ => None,
        }
    }

    /// Scratch directory path, only set when imported
    #[must_use]
    pub fn working_directory(&self) -> Option<&Path> {
        match self {
            Self::Imported {
                working_directory, ..
            } => Some(working_directory),
            _ => None,
        }
    }

    /// Whether the import finished successfully
    #[must_use]
    pub const fn is_imported(&self) -> bool {
        matches!(self, Self::Imported { .. })
    }
}

impl std::fmt::Display for ImportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
