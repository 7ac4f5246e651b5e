//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and handlers that
//! can be mounted by any HTTP server implementation or called directly by
//! clients such as the CLI.
//!
//! ## Design
//!
//! - **Handlers are thin**: Take typed input, call `ProjectService`, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{create_project, delete_project, get_project, list_project_files, list_projects};
pub use types::{
    ApiResponse, CreateProjectRequest, DeleteData, FileItem, FilesData, ProjectData, ProjectsData,
};
