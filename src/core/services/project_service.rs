//! Project service - orchestrates imports and project CRUD
//!
//! Each operation is a single async task. Blocking work (the import pipeline
//! and repository calls) runs on tokio's blocking pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, error, info, warn};

use super::error::ProjectError;
use super::importer::{ImportOutcome, Importer};
use super::scratch::ScratchDir;
use crate::core::models::{CodeFile, NewProject, Project};
use crate::core::ports::ProjectStore;

/// Creates, reads and deletes projects
pub struct ProjectService {
    importer: Arc<Importer>,
    store: Arc<dyn ProjectStore>,
    cleanup_failures: AtomicUsize,
}

impl std::fmt::Debug for ProjectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectService")
            .field("importer", &self.importer)
            .field("cleanup_failures", &self.cleanup_failures)
            .finish_non_exhaustive()
    }
}

impl ProjectService {
    /// Create a service from an importer and a store
    #[must_use]
    pub fn new(importer: Importer, store: Arc<dyn ProjectStore>) -> Self {
        Self {
            importer: Arc::new(importer),
            store,
            cleanup_failures: AtomicUsize::new(0),
        }
    }

    /// Import a repository as a new project
    ///
    /// Runs the importer, persists the imported project and then deletes the
    /// scratch directory. A failed deletion is logged and counted but does
    /// not fail the call; the returned project keeps the (now stale) path.
    ///
    /// When the import fails nothing is persisted and the error carries the
    /// project descriptor in the `Failed` state.
    pub async fn create(&self, request: NewProject) -> Result<Project, ProjectError> {
        let pending = Project::new(request);
        let id = pending.id.clone();

        let importer = Arc::clone(&self.importer);
        let attempt = pending.clone();
        let outcome = tokio::task::spawn_blocking(move || importer.import(attempt)).await?;

        let ImportOutcome { project, scratch } = match outcome {
            Ok(outcome) => outcome,
            Err(source) => {
                error!("import of {} failed: {source}", pending.source);
                self.discard_files(&id).await;
                let mut failed = pending;
                failed.mark_failed(source.to_string());
                return Err(ProjectError::ImportFailed {
                    project: Box::new(failed),
                    source,
                });
            },
        };

        let saved = {
            let project = project.clone();
            self.with_store(move |store| store.save(&project)).await
        };
        if saved.is_err() {
            self.discard_files(&id).await;
        }

        self.remove_scratch(scratch).await;

        saved?;
        info!("created project {} from {}", project.id, project.source);
        Ok(project)
    }

    /// Find a project by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Project>, ProjectError> {
        let id = id.to_string();
        self.with_store(move |store| store.find_by_id(&id)).await
    }

    /// List all projects, most recently created first
    pub async fn find_all(&self) -> Result<Vec<Project>, ProjectError> {
        self.with_store(|store| store.find_all_by_created_desc()).await
    }

    /// Delete a project and all of its code files
    ///
    /// Code files are removed first; the project record is only removed if
    /// that succeeds. Returns [`ProjectError::NotFound`] for unknown IDs.
    pub async fn delete(&self, id: &str) -> Result<(), ProjectError> {
        let key = id.to_string();
        let existed = self.with_store(move |store| store.delete_project(&key)).await?;
        if existed {
            info!("deleted project {id}");
            Ok(())
        } else {
            Err(ProjectError::NotFound(id.to_string()))
        }
    }

    /// List the code files ingested for a project
    pub async fn files(&self, id: &str) -> Result<Vec<CodeFile>, ProjectError> {
        let key = id.to_string();
        let files = self
            .with_store(move |store| {
                if store.exists(&key)? {
                    store.find_by_project_id(&key).map(Some)
                } else {
                    Ok(None)
                }
            })
            .await?;
        files.ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }

    /// Number of scratch directories that could not be deleted
    #[must_use]
    pub fn cleanup_failures(&self) -> usize {
        self.cleanup_failures.load(Ordering::Relaxed)
    }

    async fn remove_scratch(&self, scratch: ScratchDir) {
        let path = scratch.path().to_path_buf();
        info!("deleting working directory {}", path.display());

        let result = tokio::task::spawn_blocking(move || scratch.close()).await;
        let failure = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };

        self.cleanup_failures.fetch_add(1, Ordering::Relaxed);
        error!("deleting working directory {} failed: {failure}", path.display());
    }

    async fn discard_files(&self, id: &str) {
        let key = id.to_string();
        match self.with_store(move |store| store.delete_all_by_project_id(&key)).await {
            Ok(0) => {},
            Ok(n) => debug!("discarded {n} code file(s) of unsaved project {id}"),
            Err(e) => warn!("could not discard code files of unsaved project {id}: {e}"),
        }
    }

    async fn with_store<T, F>(&self, f: F) -> Result<T, ProjectError>
    where
        F: FnOnce(&dyn ProjectStore) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await?
            .map_err(ProjectError::Persistence)
    }
}
