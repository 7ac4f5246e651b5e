//! Failures of project operations as seen by API callers
//!
//! Every [`ProjectError`] collapses into one of three codes: an unknown
//! project id, a rejected import request, or a failure of the import
//! pipeline or the store.

use serde::Serialize;

use crate::core::services::ProjectError;

/// Failure class of a project operation, carrying its HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No project has the requested id (404)
    NotFound,
    /// The import request was rejected before cloning, e.g. an empty source (400)
    BadRequest,
    /// Clone, archive, upload, ingestion or persistence failed (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status a server would answer with
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::Internal => 500,
        }
    }

    /// Stable code string placed in JSON error bodies
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Error returned by the project handlers
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Failure class
    pub code: ErrorCode,
    /// Message shown to the caller, e.g. `project <id> not found`
    pub message: String,
}

impl ApiError {
    /// Unknown project id
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: message.into(),
        }
    }

    /// Rejected import request
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::BadRequest,
            message: message.into(),
        }
    }

    /// Pipeline or store failure; also used by the CLI for errors raised
    /// outside the handlers
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }

    /// HTTP status of [`Self::code`]
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Unknown ids map to 404, an empty source to 400, everything else to 500
impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match &err {
            ProjectError::NotFound(id) => Self::not_found(format!("project {id} not found")),
            ProjectError::ImportFailed { source, .. } if err.is_invalid_input() => {
                Self::bad_request(source.to_string())
            },
            _ => Self::internal(err.to_string()),
        }
    }
}

/// `error` member of a failed [`ApiResponse`](super::ApiResponse)
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// One of `NOT_FOUND`, `BAD_REQUEST` or `INTERNAL_ERROR`
    pub code: String,
    /// Same text as [`ApiError::message`]
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
