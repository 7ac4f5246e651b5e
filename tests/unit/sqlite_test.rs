//! Tests for the SQLite store

use repo_importer::adapters::SqliteStore;
use repo_importer::core::models::{CodeFile, ImportState};
use repo_importer::core::ports::{CodeFileRepository, ProjectRepository, ProjectStore};
use tempfile::TempDir;

use crate::common::fixtures::ProjectBuilder;

#[test]
fn test_projects_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("data").join("projects.db");
    let project = ProjectBuilder::new()
        .name("widgets")
        .imported("file:///blobs/a.zip", &dir.path().join("scratch"));

    {
        let store = SqliteStore::open(&db).unwrap();
        store.save(&project).unwrap();
        store
            .save_all(&[CodeFile::new(&project.id, "README.md", "# hi".to_string())])
            .unwrap();
    }

    let store = SqliteStore::open(&db).unwrap();
    assert_eq!(store.find_by_id(&project.id).unwrap(), Some(project.clone()));
    assert_eq!(store.find_by_project_id(&project.id).unwrap().len(), 1);
}

#[test]
fn test_find_all_orders_any_insertion_order() {
    let store = SqliteStore::in_memory().unwrap();
    let offsets = [30, 0, 50, 10, 40, 20];
    for (i, secs) in offsets.iter().enumerate() {
        let project = ProjectBuilder::new().source(&format!("repo-{i}")).created_after(*secs).build();
        store.save(&project).unwrap();
    }

    let all = store.find_all_by_created_desc().unwrap();

    assert_eq!(all.len(), offsets.len());
    assert!(all.windows(2).all(|w| w[0].created > w[1].created));
}

#[test]
fn test_equal_timestamps_list_latest_insert_first() {
    let store = SqliteStore::in_memory().unwrap();
    let first = ProjectBuilder::new().source("first").build();
    let second = ProjectBuilder::new().source("second").build();
    store.save(&first).unwrap();
    store.save(&second).unwrap();

    let all = store.find_all_by_created_desc().unwrap();

    assert_eq!(all[0].source, "second");
    assert_eq!(all[1].source, "first");
}

#[test]
fn test_failed_state_round_trips() {
    let store = SqliteStore::in_memory().unwrap();
    let mut project = ProjectBuilder::new().build();
    project.mark_failed("remote hung up");
    store.save(&project).unwrap();

    let loaded = store.find_by_id(&project.id).unwrap().unwrap();

    assert_eq!(
        loaded.state,
        ImportState::Failed {
            reason: "remote hung up".to_string()
        }
    );
}

#[test]
fn test_files_are_scoped_to_project_and_sorted() {
    let store = SqliteStore::in_memory().unwrap();
    let a = ProjectBuilder::new().source("a").build();
    let b = ProjectBuilder::new().source("b").build();
    store.save(&a).unwrap();
    store.save(&b).unwrap();
    store
        .save_all(&[
            CodeFile::new(&a.id, "src/lib.rs", String::new()),
            CodeFile::new(&b.id, "other.rs", String::new()),
            CodeFile::new(&a.id, "Cargo.toml", String::new()),
        ])
        .unwrap();

    let paths: Vec<String> =
        store.find_by_project_id(&a.id).unwrap().into_iter().map(|f| f.path).collect();
    assert_eq!(paths, vec!["Cargo.toml", "src/lib.rs"]);

    assert!(store.delete_project(&a.id).unwrap());
    assert!(store.find_by_project_id(&a.id).unwrap().is_empty());
    assert_eq!(store.find_by_project_id(&b.id).unwrap().len(), 1);
    assert!(!store.exists(&a.id).unwrap());
}
