//! Filesystem blob store
//!
//! Stores each object as `<root>/<bucket>/<name>` and hands back a `file://`
//! URL. Useful for local deployments and tests.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;
use tempfile::NamedTempFile;

use crate::core::ports::BlobStore;

/// Blob store backed by a local directory
#[derive(Debug, Clone)]
pub struct FilesystemBlobStore {
    root: PathBuf,
}

impl FilesystemBlobStore {
    /// Create a store rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path an object is stored at
    #[must_use]
    pub fn object_path(&self, bucket: &str, name: &str) -> PathBuf {
        self.root.join(bucket).join(name)
    }
}

impl BlobStore for FilesystemBlobStore {
    fn upload(
        &self,
        mut body: Box<dyn Read + Send>,
        size: u64,
        name: &str,
        bucket: &str,
    ) -> anyhow::Result<String> {
        validate_component("object name", name)?;
        validate_component("bucket", bucket)?;

        let dir = self.root.join(bucket);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create bucket directory {}", dir.display()))?;

        // Write beside the target and rename so readers never see a partial object
        let mut staging = NamedTempFile::new_in(&dir)?;
        let written = io::copy(&mut body, staging.as_file_mut())?;
        if written != size {
            anyhow::bail!("expected {size} bytes for {bucket}/{name}, read {written}");
        }

        let path = dir.join(name);
        staging
            .persist_noclobber(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("object {bucket}/{name} already exists or cannot be written"))?;

        debug!("stored {written} bytes at {}", path.display());
        Ok(format!("file://{}", path.display()))
    }
}

fn validate_component(what: &str, value: &str) -> anyhow::Result<()> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        anyhow::bail!("invalid {what}: {value:?}");
    }
    Ok(())
}
