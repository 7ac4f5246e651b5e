//! Service wiring
//!
//! Builds a [`ProjectService`] from a [`ServiceConfig`] by choosing the
//! concrete adapters for each port.

use std::sync::Arc;

use log::debug;

use crate::adapters::{CodeFileIngestor, FilesystemBlobStore, GitFetcher, SqliteStore};
use crate::config::{BlobConfig, ServiceConfig};
use crate::core::ports::{BlobStore, CodeFileRepository, ProjectStore};
use crate::core::services::{Importer, ProjectService};

/// Build the blob store selected by `config`
pub fn blob_store(config: &BlobConfig) -> anyhow::Result<Arc<dyn BlobStore>> {
    match config {
        BlobConfig::Filesystem { root } => {
            debug!("using filesystem blob store at {}", root.display());
            Ok(Arc::new(FilesystemBlobStore::new(root.clone())))
        },
        #[cfg(feature = "gcs")]
        BlobConfig::Gcs { endpoint, token } => {
            debug!("using GCS blob store at {endpoint}");
            Ok(Arc::new(crate::adapters::blob::GcsBlobStore::new(
                endpoint.clone(),
                token.clone(),
            )))
        },
        #[cfg(not(feature = "gcs"))]
        BlobConfig::Gcs { .. } => {
            anyhow::bail!("the gcs blob backend requires building with `--features gcs`")
        },
    }
}

/// Build a project service backed by the configured database and blob store
pub fn build_service(config: &ServiceConfig) -> anyhow::Result<ProjectService> {
    let store = Arc::new(SqliteStore::open(&config.database)?);
    build_service_with_store(config, store)
}

/// Build a project service on top of an existing store
pub fn build_service_with_store(
    config: &ServiceConfig,
    store: Arc<SqliteStore>,
) -> anyhow::Result<ProjectService> {
    let files: Arc<dyn CodeFileRepository> = store.clone();
    let ingestion = Arc::new(CodeFileIngestor::new(files, config.ingest()));
    let importer = Importer::new(
        Arc::new(GitFetcher::new(config.git())),
        blob_store(&config.blob)?,
        ingestion,
        config.importer(),
    );

    let store: Arc<dyn ProjectStore> = store;
    Ok(ProjectService::new(importer, store))
}
