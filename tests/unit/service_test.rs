//! Tests for the project service
//!
//! Uses mocked collaborators to check persistence, cleanup and error
//! semantics of each operation.

use std::sync::Arc;

use repo_importer::core::models::{ImportState, NewProject};
use repo_importer::core::ports::ProjectRepository;
use repo_importer::core::services::{ImportError, ProjectError};

use crate::common::fixtures::{Failure, MockedService, ProjectBuilder};

fn request() -> NewProject {
    NewProject::new("https://example.com/acme/widgets.git")
        .with_name("widgets")
        .with_description("Widget sources")
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn test_create_persists_imported_project() {
    let m = MockedService::new();

    let project = m.service.create(request()).await.unwrap();

    assert!(project.state.is_imported());
    assert!(project.download_url().unwrap().starts_with("mock://test-bucket/archive-"));
    assert_eq!(project.name.as_deref(), Some("widgets"));
    assert_eq!(project.description.as_deref(), Some("Widget sources"));

    let stored = m.service.find_by_id(&project.id).await.unwrap().unwrap();
    assert_eq!(stored, project);
}

#[tokio::test]
async fn test_create_removes_scratch_but_keeps_path() {
    let m = MockedService::new();

    let project = m.service.create(request()).await.unwrap();

    let working_directory = project.working_directory().unwrap();
    assert!(working_directory.starts_with(m.scratch.path()));
    assert!(!working_directory.exists());
    assert_eq!(m.scratch_entries(), 0);
    assert_eq!(m.service.cleanup_failures(), 0);
}

#[tokio::test]
async fn test_create_ingests_files() {
    let m = MockedService::new();

    let project = m.service.create(request()).await.unwrap();

    let files = m.service.files(&project.id).await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "README.md");
    // The checkout still existed while ingestion ran
    assert_eq!(files[0].contents, "true");
}

#[tokio::test]
async fn test_clone_failure_persists_nothing() {
    let m = MockedService::failing(Failure::Fetch);

    let err = m.service.create(request()).await.unwrap_err();

    match err {
        ProjectError::ImportFailed { project, source } => {
            assert!(matches!(source, ImportError::Clone { .. }));
            assert!(matches!(project.state, ImportState::Failed { .. }));
            assert_eq!(project.source, "https://example.com/acme/widgets.git");
        },
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(m.store.project_count(), 0);
    assert_eq!(m.scratch_entries(), 0);
}

#[tokio::test]
async fn test_upload_failure_persists_nothing() {
    let m = MockedService::failing(Failure::Upload);

    let err = m.service.create(request()).await.unwrap_err();

    match err {
        ProjectError::ImportFailed { project, source } => {
            match source {
                ImportError::Upload { name, bucket, .. } => {
                    assert!(name.starts_with("archive-"));
                    assert_eq!(bucket, "test-bucket");
                },
                other => panic!("unexpected import error: {other}"),
            }
            assert!(matches!(project.state, ImportState::Failed { .. }));
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(m.blobs.uploads().is_empty());
    assert!(m.ingestion.seen().is_empty());
    assert_eq!(m.store.project_count(), 0);
    assert_eq!(m.store.file_count(), 0);
    assert_eq!(m.scratch_entries(), 0);
}

#[tokio::test]
async fn test_ingestion_failure_discards_written_files() {
    let m = MockedService::failing(Failure::Ingestion);

    let err = m.service.create(request()).await.unwrap_err();

    assert!(matches!(
        err,
        ProjectError::ImportFailed {
            source: ImportError::Ingestion(_),
            ..
        }
    ));
    assert_eq!(m.store.project_count(), 0);
    assert_eq!(m.store.file_count(), 0);
}

#[tokio::test]
async fn test_save_failure_discards_files_and_scratch() {
    let m = MockedService::failing(Failure::Save);

    let err = m.service.create(request()).await.unwrap_err();

    assert!(matches!(err, ProjectError::Persistence(_)));
    assert_eq!(m.store.file_count(), 0);
    assert_eq!(m.scratch_entries(), 0);
}

#[tokio::test]
async fn test_scratch_cleanup_failure_is_counted_not_returned() {
    let m = MockedService::failing(Failure::Cleanup);

    let project = m.service.create(request()).await.unwrap();

    assert_eq!(m.service.cleanup_failures(), 1);
    assert!(project.state.is_imported());
    let stored = m.service.find_by_id(&project.id).await.unwrap().unwrap();
    assert_eq!(stored, project);
    assert_eq!(m.store.file_count(), 1);
}

#[tokio::test]
async fn test_empty_source_is_invalid_input() {
    let m = MockedService::new();

    let err = m.service.create(NewProject::new("")).await.unwrap_err();

    assert!(err.is_invalid_input());
    assert!(m.fetcher.destinations().is_empty());
}

#[tokio::test]
async fn test_concurrent_imports_get_distinct_archives() {
    let m = Arc::new(MockedService::new());

    let a = {
        let m = Arc::clone(&m);
        tokio::spawn(async move { m.service.create(request()).await })
    };
    let b = {
        let m = Arc::clone(&m);
        tokio::spawn(async move { m.service.create(request()).await })
    };
    let a = a.await.unwrap().unwrap();
    let b = b.await.unwrap().unwrap();

    assert_ne!(a.id, b.id);
    assert_ne!(a.download_url(), b.download_url());
    assert_ne!(a.working_directory(), b.working_directory());
    assert_eq!(m.blobs.uploads().len(), 2);
}

// =============================================================================
// READ
// =============================================================================

#[tokio::test]
async fn test_find_by_id_missing_is_none() {
    let m = MockedService::new();
    assert!(m.service.find_by_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_all_orders_by_created_desc() {
    let m = MockedService::new();
    let middle = ProjectBuilder::new().source("b").created_after(10).build();
    let oldest = ProjectBuilder::new().source("a").build();
    let newest = ProjectBuilder::new().source("c").created_after(20).build();
    for project in [&middle, &oldest, &newest] {
        m.store.save(project).unwrap();
    }

    let all = m.service.find_all().await.unwrap();

    let sources: Vec<&str> = all.iter().map(|p| p.source.as_str()).collect();
    assert_eq!(sources, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn test_files_of_missing_project_is_not_found() {
    let m = MockedService::new();
    let err = m.service.files("nope").await.unwrap_err();
    assert!(matches!(err, ProjectError::NotFound(id) if id == "nope"));
}

// =============================================================================
// DELETE
// =============================================================================

#[tokio::test]
async fn test_delete_removes_project_and_files() {
    let m = MockedService::new();
    let project = m.service.create(request()).await.unwrap();
    assert_eq!(m.store.file_count(), 1);

    m.service.delete(&project.id).await.unwrap();

    assert!(m.service.find_by_id(&project.id).await.unwrap().is_none());
    assert_eq!(m.store.file_count(), 0);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let m = MockedService::new();

    let first = m.service.delete("nope").await.unwrap_err();
    let second = m.service.delete("nope").await.unwrap_err();

    assert!(matches!(first, ProjectError::NotFound(_)));
    assert!(matches!(second, ProjectError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_twice_reports_not_found_second_time() {
    let m = MockedService::new();
    let project = m.service.create(request()).await.unwrap();

    m.service.delete(&project.id).await.unwrap();
    let err = m.service.delete(&project.id).await.unwrap_err();

    assert!(matches!(err, ProjectError::NotFound(_)));
}

#[tokio::test]
async fn test_failed_file_delete_keeps_project() {
    let m = MockedService::failing(Failure::FileDelete);
    let project = ProjectBuilder::new().build();
    m.store.save(&project).unwrap();

    let err = m.service.delete(&project.id).await.unwrap_err();

    assert!(matches!(err, ProjectError::Persistence(_)));
    let stored = m.service.find_by_id(&project.id).await.unwrap();
    assert_eq!(stored, Some(project));
}
