//! Repository importer
//!
//! Runs the import pipeline for one project:
//!
//! 1. create a scratch directory
//! 2. clone the source repository into it
//! 3. drop the `.git` directory
//! 4. zip the checkout
//! 5. upload the archive to the blob store
//! 6. mark the project imported
//! 7. hand it to file ingestion
//!
//! Every step is blocking; callers run [`Importer::import`] on a blocking
//! worker. There is no retry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info};

use super::archive::Archive;
use super::error::ImportError;
use super::scratch::ScratchDir;
use crate::core::models::Project;
use crate::core::ports::{BlobStore, FileIngestion, RepositoryFetcher};

/// Name of the version control metadata directory removed before archiving
pub const VCS_METADATA_DIR: &str = ".git";

/// Importer settings
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Bucket archives are uploaded to
    pub bucket: String,
    /// Parent directory for scratch checkouts and archives (system temp if unset)
    pub scratch_parent: Option<PathBuf>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            bucket: crate::config::DEFAULT_BUCKET.to_string(),
            scratch_parent: None,
        }
    }
}

/// Result of a successful import
///
/// The scratch directory is handed back so the caller decides when it goes
/// away. Dropping the outcome deletes it.
#[derive(Debug)]
pub struct ImportOutcome {
    /// The project, in the `Imported` state
    pub project: Project,
    /// The checkout the project was archived from
    pub scratch: ScratchDir,
}

/// Clones, archives and uploads source repositories
pub struct Importer {
    fetcher: Arc<dyn RepositoryFetcher>,
    blobs: Arc<dyn BlobStore>,
    ingestion: Arc<dyn FileIngestion>,
    config: ImporterConfig,
}

impl std::fmt::Debug for Importer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Importer").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Importer {
    /// Create an importer from its collaborators
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn RepositoryFetcher>,
        blobs: Arc<dyn BlobStore>,
        ingestion: Arc<dyn FileIngestion>,
        config: ImporterConfig,
    ) -> Self {
        Self {
            fetcher,
            blobs,
            ingestion,
            config,
        }
    }

    /// Importer settings
    #[must_use]
    pub const fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Run the import pipeline for `project`
    ///
    /// On failure the scratch directory and archive are already gone when
    /// this returns.
    pub fn import(&self, mut project: Project) -> Result<ImportOutcome, ImportError> {
        if project.source.trim().is_empty() {
            return Err(ImportError::EmptySource);
        }

        let scratch = ScratchDir::create(self.config.scratch_parent.as_deref())
            .map_err(ImportError::Scratch)?;

        info!("cloning {} into {}", project.source, scratch.path().display());
        self.fetcher.fetch(&project.source, scratch.path()).map_err(|source| {
            error!("issue cloning repository {}: {source:#}", project.source);
            ImportError::Clone {
                url: project.source.clone(),
                source,
            }
        })?;

        strip_vcs_metadata(scratch.path()).map_err(ImportError::StripMetadata)?;
        info!("removed {VCS_METADATA_DIR} directory");

        let download_url = self.upload(scratch.path())?;
        info!("uploaded archive to {download_url}");

        project.mark_imported(download_url, scratch.path());

        let project = self.ingestion.import_files(project).map_err(ImportError::Ingestion)?;
        debug!("file ingestion finished for project {}", project.id);

        Ok(ImportOutcome { project, scratch })
    }

    fn upload(&self, checkout: &Path) -> Result<String, ImportError> {
        let archive = Archive::pack(checkout, self.config.scratch_parent.as_deref())
            .map_err(ImportError::Archive)?;
        let reader = archive.reopen().map_err(|e| ImportError::Archive(e.into()))?;
        let size = reader.metadata().map_err(|e| ImportError::Archive(e.into()))?.len();

        let bucket = &self.config.bucket;
        self.blobs.upload(Box::new(reader), size, archive.name(), bucket).map_err(|source| {
            ImportError::Upload {
                name: archive.name().to_string(),
                bucket: bucket.clone(),
                source,
            }
        })
    }
}

/// Remove the `.git` directory from a checkout
///
/// A checkout without one is left untouched.
pub fn strip_vcs_metadata(checkout: &Path) -> io::Result<()> {
    match fs::remove_dir_all(checkout.join(VCS_METADATA_DIR)) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
