//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiErrorData};
use crate::core::models::{CodeFile, NewProject, Project};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wrap a handler result
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(ApiErrorData::from(&err)),
            },
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating a project
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    /// Clone URL of the repository to import
    #[serde(default)]
    pub source: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            source: req.source.trim().to_string(),
            name: req.name.filter(|n| !n.trim().is_empty()),
            description: req.description.filter(|d| !d.trim().is_empty()),
        }
    }
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Single project response data
#[derive(Debug, Serialize)]
pub struct ProjectData {
    /// The project
    pub project: Project,
}

/// Project list response data
#[derive(Debug, Serialize)]
pub struct ProjectsData {
    /// Projects, most recently created first
    pub projects: Vec<Project>,
    /// Number of projects
    pub total: usize,
}

/// Code file summary (contents omitted)
#[derive(Debug, Serialize)]
pub struct FileItem {
    /// File ID
    pub id: String,
    /// Path relative to the repository root
    pub path: String,
    /// Size in bytes
    pub size: u64,
}

impl From<CodeFile> for FileItem {
    fn from(file: CodeFile) -> Self {
        Self {
            id: file.id,
            path: file.path,
            size: file.size,
        }
    }
}

/// Code file list response data
#[derive(Debug, Serialize)]
pub struct FilesData {
    /// Owning project ID
    pub project_id: String,
    /// Files ordered by path
    pub files: Vec<FileItem>,
}

/// Delete response data
#[derive(Debug, Serialize)]
pub struct DeleteData {
    /// ID of the deleted project
    pub id: String,
    /// Always true; missing projects are reported as errors
    pub deleted: bool,
}
