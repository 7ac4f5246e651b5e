//! Code file model
//!
//! A text file read out of an imported repository during file ingestion.

use serde::{Deserialize, Serialize};

/// A source file belonging to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFile {
    /// Unique identifier (generated)
    pub id: String,

    /// Owning project ID
    pub project_id: String,

    /// Path relative to the repository root, `/`-separated
    pub path: String,

    /// File contents (UTF-8)
    pub contents: String,

    /// Size of the file on disk in bytes
    pub size: u64,
}

impl CodeFile {
    /// Create a code file record for a project
    #[must_use]
    pub fn new(project_id: &str, path: impl Into<String>, contents: String) -> Self {
        let size = contents.len() as u64;
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            project_id: project_id.to_string(),
            path: path.into(),
            contents,
            size,
        }
    }

    /// File extension, if any
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.path.rsplit('/').next()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() { None } else { Some(ext) }
    }
}
