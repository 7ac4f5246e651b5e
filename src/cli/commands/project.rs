//! Project commands
//!
//! Thin wrappers over the API handlers that render the result.

use repo_importer::api::{self, ApiError, CreateProjectRequest};
use repo_importer::core::services::ProjectService;
use repo_importer::output::{
    FileListResult, OperationResult, OutputMode, ProjectListResult, ProjectResult,
};

/// Import a repository as a new project
pub async fn import(
    service: &ProjectService,
    source: String,
    name: Option<String>,
    description: Option<String>,
    mode: OutputMode,
) -> Result<(), ApiError> {
    let req = CreateProjectRequest {
        source,
        name,
        description,
    };
    let data = api::create_project(service, req).await?;
    ProjectResult {
        project: data.project,
    }
    .render(mode);
    Ok(())
}

/// Show a project
pub async fn show(service: &ProjectService, id: &str, mode: OutputMode) -> Result<(), ApiError> {
    let data = api::get_project(service, id).await?;
    ProjectResult {
        project: data.project,
    }
    .render(mode);
    Ok(())
}

/// List projects
pub async fn list(service: &ProjectService, mode: OutputMode) -> Result<(), ApiError> {
    let data = api::list_projects(service).await?;
    ProjectListResult {
        projects: data.projects,
    }
    .render(mode);
    Ok(())
}

/// List the files of a project
pub async fn files(service: &ProjectService, id: &str, mode: OutputMode) -> Result<(), ApiError> {
    let data = api::list_project_files(service, id).await?;
    FileListResult {
        project_id: data.project_id,
        files: data.files,
    }
    .render(mode);
    Ok(())
}

/// Delete a project
pub async fn delete(service: &ProjectService, id: &str, mode: OutputMode) -> Result<(), ApiError> {
    api::delete_project(service, id).await?;
    OperationResult {
        success: true,
        message: format!("Deleted project {id}"),
    }
    .render(mode);
    Ok(())
}
