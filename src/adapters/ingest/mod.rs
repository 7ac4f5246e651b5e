//! Code file ingestion
//!
//! Implements `FileIngestion` by reading the text files of an imported
//! checkout and storing them as `CodeFile` records.

use std::fs;
use std::sync::Arc;

use log::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::core::models::{CodeFile, Project};
use crate::core::ports::{CodeFileRepository, FileIngestion};

/// Default size limit for ingested files (1 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Ingestion limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestConfig {
    /// Files larger than this are skipped
    pub max_file_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

/// Stores the text files of an imported checkout
pub struct CodeFileIngestor {
    files: Arc<dyn CodeFileRepository>,
    config: IngestConfig,
}

impl std::fmt::Debug for CodeFileIngestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeFileIngestor").field("config", &self.config).finish_non_exhaustive()
    }
}

impl CodeFileIngestor {
    /// Create an ingestor writing to `files`
    #[must_use]
    pub fn new(files: Arc<dyn CodeFileRepository>, config: IngestConfig) -> Self {
        Self { files, config }
    }

    /// Read the ingestible files below the project's working directory
    ///
    /// Hidden entries, files over the size limit and files that are not
    /// valid UTF-8 text are skipped.
    pub fn collect(&self, project: &Project) -> anyhow::Result<Vec<CodeFile>> {
        let Some(root) = project.working_directory() else {
            anyhow::bail!("project {} has no working directory to ingest", project.id);
        };

        let mut collected = Vec::new();
        let walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
        for entry in walker.into_iter().filter_entry(|e| e.depth() == 0 || !is_hidden(e)) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let size = entry.metadata()?.len();
            if size > self.config.max_file_bytes {
                debug!("skipping {} ({size} bytes)", entry.path().display());
                continue;
            }

            let bytes = fs::read(entry.path())?;
            let Some(contents) = as_text(bytes) else {
                debug!("skipping binary file {}", entry.path().display());
                continue;
            };

            let relative = entry.path().strip_prefix(root)?;
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            collected.push(CodeFile::new(&project.id, path, contents));
        }

        Ok(collected)
    }
}

impl FileIngestion for CodeFileIngestor {
    fn import_files(&self, project: Project) -> anyhow::Result<Project> {
        let files = self.collect(&project)?;
        self.files.save_all(&files)?;
        info!("imported {} file(s) for project {}", files.len(), project.id);
        Ok(project)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn as_text(bytes: Vec<u8>) -> Option<String> {
    if bytes.contains(&0) {
        return None;
    }
    String::from_utf8(bytes).ok()
}
