//! Scratch directory guard
//!
//! Every import clones into its own directory. The guard removes it when
//! dropped, so error paths never leave a checkout behind. Successful imports
//! close it explicitly to observe deletion failures.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::TempDir;

/// A uniquely named, exclusively owned scratch directory
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a new scratch directory
    ///
    /// The directory is created under `parent` when given (creating `parent`
    /// if needed), otherwise under the system temp directory. Names look like
    /// `repo-<epoch-millis>-<random>`.
    pub fn create(parent: Option<&Path>) -> io::Result<Self> {
        let prefix = format!("repo-{}-", chrono::Utc::now().timestamp_millis());
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let dir = match parent {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            },
            None => builder.tempdir()?,
        };

        Ok(Self { dir })
    }

    /// Path of the scratch directory
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the directory and everything in it, reporting failures
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}
