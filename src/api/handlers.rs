//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.

use log::debug;

use crate::core::models::NewProject;
use crate::core::services::ProjectService;

use super::error::ApiError;
use super::types::{
    CreateProjectRequest, DeleteData, FileItem, FilesData, ProjectData, ProjectsData,
};

// =============================================================================
// PROJECTS
// =============================================================================

/// Import a repository as a new project
pub async fn create_project(
    service: &ProjectService,
    req: CreateProjectRequest,
) -> Result<ProjectData, ApiError> {
    let new = NewProject::from(req);
    if new.source.is_empty() {
        return Err(ApiError::bad_request("source is required"));
    }

    debug!("create project from {}", new.source);
    let project = service.create(new).await?;
    Ok(ProjectData { project })
}

/// Get a single project by ID
pub async fn get_project(service: &ProjectService, id: &str) -> Result<ProjectData, ApiError> {
    match service.find_by_id(id).await? {
        Some(project) => Ok(ProjectData { project }),
        None => Err(ApiError::not_found(format!("project {id} not found"))),
    }
}

/// List all projects, most recently created first
pub async fn list_projects(service: &ProjectService) -> Result<ProjectsData, ApiError> {
    let projects = service.find_all().await?;
    Ok(ProjectsData {
        total: projects.len(),
        projects,
    })
}

/// Delete a project and its code files
pub async fn delete_project(service: &ProjectService, id: &str) -> Result<DeleteData, ApiError> {
    service.delete(id).await?;
    Ok(DeleteData {
        id: id.to_string(),
        deleted: true,
    })
}

/// List the code files of a project
pub async fn list_project_files(
    service: &ProjectService,
    id: &str,
) -> Result<FilesData, ApiError> {
    let files = service.files(id).await?;
    Ok(FilesData {
        project_id: id.to_string(),
        files: files.into_iter().map(FileItem::from).collect(),
    })
}
