//! Tests for the repo-importer binary

use std::path::{Path, PathBuf};

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::git_repo::TempGitRepo;

/// Helper function to create a repo-importer command using `config`
fn importer(config: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("repo-importer"));
    cmd.arg("--config").arg(config);
    for key in [
        "REPO_IMPORTER_BUCKET",
        "REPO_IMPORTER_DATABASE",
        "REPO_IMPORTER_SCRATCH_DIR",
        "REPO_IMPORTER_BLOB_ROOT",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

/// Write a config that keeps all state inside `dir`
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    let content = format!(
        "bucket = \"cli-bucket\"\n\
         database = {:?}\n\
         scratch_dir = {:?}\n\n\
         [blob]\n\
         backend = \"filesystem\"\n\
         root = {:?}\n",
        dir.join("projects.db").to_string_lossy(),
        dir.join("scratch").to_string_lossy(),
        dir.join("blobs").to_string_lossy(),
    );
    std::fs::write(&path, content).unwrap();
    path
}

fn import_json(config: &Path, url: &str) -> serde_json::Value {
    let output = importer(config).args(["--json", "import", url]).output().unwrap();
    assert!(output.status.success(), "import failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    importer(&temp.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Import git repositories"));
}

#[test]
fn test_config_shows_effective_values() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    importer(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("cli-bucket"));
}

#[test]
fn test_import_list_show_files_delete() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let origin = TempGitRepo::with_sample_tree();

    let created = import_json(&config, &origin.url());
    let id = created["project"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["project"]["state"], "imported");

    importer(&config)
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()));

    importer(&config)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("imported"));

    importer(&config)
        .args(["files", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/main.rs"));

    importer(&config).args(["delete", &id]).assert().success();

    importer(&config)
        .args(["--json", "show", &id])
        .assert()
        .failure()
        .stdout(predicate::str::contains("NOT_FOUND"));
}

#[test]
fn test_list_is_newest_first() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let origin = TempGitRepo::with_sample_tree();

    let ids: Vec<String> = (0..3)
        .map(|_| import_json(&config, &origin.url())["project"]["id"].as_str().unwrap().to_string())
        .collect();

    let output = importer(&config).args(["--json", "list"]).output().unwrap();
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let listed: Vec<&str> = listed["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();

    let expected: Vec<&str> = ids.iter().rev().map(String::as_str).collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_import_unreachable_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let missing = temp.path().join("missing-repo");

    importer(&config)
        .args(["import", &missing.to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to clone"));

    importer(&config)
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"projects\": []"));
}

#[test]
fn test_delete_missing_is_not_found() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    importer(&config)
        .args(["--json", "delete", "does-not-exist"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("NOT_FOUND"));
}
