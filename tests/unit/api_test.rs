//! Tests for API module
//!
//! Tests handler status mapping and response envelopes against a mocked
//! service.

use repo_importer::api::{self, ApiResponse, CreateProjectRequest, ErrorCode};

use crate::common::fixtures::{Failure, MockedService};

fn create_request(source: &str) -> CreateProjectRequest {
    CreateProjectRequest {
        source: source.to_string(),
        name: None,
        description: Some("imported in tests".to_string()),
    }
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn test_create_project_returns_imported_project() {
    let m = MockedService::new();

    let data = api::create_project(&m.service, create_request("https://example.com/r.git"))
        .await
        .unwrap();

    assert!(data.project.state.is_imported());
    assert_eq!(data.project.description.as_deref(), Some("imported in tests"));
}

#[tokio::test]
async fn test_create_project_blank_source_is_bad_request() {
    let m = MockedService::new();

    let err = api::create_project(&m.service, create_request("  ")).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::BadRequest);
    assert_eq!(err.status_code(), 400);
    assert!(m.fetcher.destinations().is_empty());
}

#[tokio::test]
async fn test_create_project_clone_failure_is_internal() {
    let m = MockedService::failing(Failure::Fetch);

    let err = api::create_project(&m.service, create_request("https://example.com/r.git"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(err.message.contains("https://example.com/r.git"));
}

// =============================================================================
// READ / DELETE
// =============================================================================

#[tokio::test]
async fn test_get_missing_project_is_not_found() {
    let m = MockedService::new();
    let err = api::get_project(&m.service, "missing").await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_list_projects_counts() {
    let m = MockedService::new();
    api::create_project(&m.service, create_request("https://example.com/a.git")).await.unwrap();
    api::create_project(&m.service, create_request("https://example.com/b.git")).await.unwrap();

    let data = api::list_projects(&m.service).await.unwrap();

    assert_eq!(data.total, 2);
    assert_eq!(data.projects.len(), 2);
}

#[tokio::test]
async fn test_files_and_delete() {
    let m = MockedService::new();
    let created = api::create_project(&m.service, create_request("https://example.com/a.git"))
        .await
        .unwrap();
    let id = created.project.id;

    let files = api::list_project_files(&m.service, &id).await.unwrap();
    assert_eq!(files.project_id, id);
    assert_eq!(files.files.len(), 1);

    let deleted = api::delete_project(&m.service, &id).await.unwrap();
    assert!(deleted.deleted);

    let err = api::delete_project(&m.service, &id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    let err = api::list_project_files(&m.service, &id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

// =============================================================================
// ENVELOPE
// =============================================================================

#[tokio::test]
async fn test_envelope_serialization() {
    let m = MockedService::new();

    let ok = ApiResponse::from_result(api::list_projects(&m.service).await);
    let json = serde_json::to_value(&ok).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["total"], 0);
    assert!(json.get("error").is_none());

    let err = ApiResponse::from_result(api::get_project(&m.service, "missing").await);
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}
