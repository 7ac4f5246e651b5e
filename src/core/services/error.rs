//! Service error types

use thiserror::Error;

use crate::core::models::Project;

/// Errors that abort an import
#[derive(Debug, Error)]
pub enum ImportError {
    /// The project had no source URL
    #[error("source url is empty")]
    EmptySource,

    /// Scratch directory could not be created
    #[error("failed to create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),

    /// Cloning the source repository failed
    #[error("failed to clone {url}: {source:#}")]
    Clone {
        /// Source URL that was being cloned
        url: String,
        /// Underlying transport or I/O failure
        source: anyhow::Error,
    },

    /// The `.git` directory could not be removed from the checkout
    #[error("failed to remove version control metadata: {0}")]
    StripMetadata(#[source] std::io::Error),

    /// Packing the checkout into a zip archive failed
    #[error("failed to archive repository: {0:#}")]
    Archive(#[source] anyhow::Error),

    /// The blob store rejected the archive
    #[error("failed to upload {name} to bucket {bucket}: {source:#}")]
    Upload {
        /// Object name the archive was uploaded as
        name: String,
        /// Target bucket
        bucket: String,
        /// Underlying blob store failure
        source: anyhow::Error,
    },

    /// File ingestion failed after upload
    #[error("file ingestion failed: {0:#}")]
    Ingestion(#[source] anyhow::Error),
}

/// Errors returned by the project service
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The import pipeline failed; nothing was persisted
    #[error("import of {} failed: {source}", .project.source)]
    ImportFailed {
        /// The project descriptor, in the `Failed` state
        project: Box<Project>,
        /// Why the import failed
        source: ImportError,
    },

    /// No project with this ID
    #[error("project not found: {0}")]
    NotFound(String),

    /// The repository layer failed
    #[error("persistence error: {0:#}")]
    Persistence(#[source] anyhow::Error),

    /// A blocking worker task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ProjectError {
    /// Whether the error was caused by invalid caller input
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::ImportFailed {
                source: ImportError::EmptySource,
                ..
            }
        )
    }
}
