//! Project model
//!
//! A project is the record of one imported source repository: where it came
//! from, when it was requested, and where its archive ended up.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ImportState;

/// A request to import a repository as a new project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Clone URL of the source repository
    pub source: String,

    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewProject {
    /// Create a request for the given source URL without metadata
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: None,
            description: None,
        }
    }

    /// Attach a display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An imported (or importing) source repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (generated)
    pub id: String,

    /// Clone URL of the source repository
    pub source: String,

    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the import was requested
    pub created: DateTime<Utc>,

    /// Where the project is in its import lifecycle
    #[serde(flatten)]
    pub state: ImportState,
}

impl Project {
    /// Create a pending project from an import request
    #[must_use]
    pub fn new(request: NewProject) -> Self {
        Self::with_created(request, Utc::now())
    }

    /// Create a pending project with an explicit creation time
    #[must_use]
    pub fn with_created(request: NewProject, created: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            source: request.source,
            name: request.name,
            description: request.description,
            created,
            state: ImportState::Pending,
        }
    }

    /// Record a successful import
    pub fn mark_imported(&mut self, download_url: String, working_directory: &Path) {
        self.state = ImportState::Imported {
            download_url,
            working_directory: working_directory.to_path_buf(),
        };
    }

    /// Record a failed import
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.state = ImportState::Failed {
            reason: reason.into(),
        };
    }

    /// Blob store reference of the uploaded archive, once imported
    #[must_use]
    pub fn download_url(&self) -> Option<&str> {
        self.state.download_url()
    }

    /// Scratch directory the repository was cloned into, once imported
    #[must_use]
    pub fn working_directory(&self) -> Option<&Path> {
        self.state.working_directory()
    }

    /// Name to show for this project, falling back to the repository name in the URL
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| repo_name_from_url(&self.source))
    }
}

/// Extract the repository name from a clone URL
///
/// `https://github.com/user/repo.git` -> `repo`
#[must_use]
pub fn repo_name_from_url(url: &str) -> String {
    url.trim()
        .trim_end_matches('/')
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .map(|n| n.trim_end_matches(".git").to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "project".to_string())
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
