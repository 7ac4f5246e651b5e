//! File ingestion port
//!
//! Defines the hand-off from the importer to whatever reads files out of the
//! cloned repository.

use super::super::models::Project;

/// Post-import file ingestion
///
/// Runs while the scratch directory still exists. Implementations read from
/// `project.working_directory()` and may return a further augmented project.
pub trait FileIngestion: Send + Sync {
    /// Ingest the files of an imported project
    fn import_files(&self, project: Project) -> anyhow::Result<Project>;
}
