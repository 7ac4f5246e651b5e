//! Project persistence ports
//!
//! Defines the interfaces for storing projects and their code files.

use super::super::models::{CodeFile, Project};

/// Repository for project records
pub trait ProjectRepository: Send + Sync {
    /// Insert or replace a project
    fn save(&self, project: &Project) -> anyhow::Result<()>;

    /// Find a project by ID
    fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Project>>;

    /// List all projects, most recently created first
    fn find_all_by_created_desc(&self) -> anyhow::Result<Vec<Project>>;

    /// Delete a project record
    ///
    /// Returns `false` if no project had this ID.
    fn delete_by_id(&self, id: &str) -> anyhow::Result<bool>;

    /// Check whether a project exists
    fn exists(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

/// Repository for code file records
pub trait CodeFileRepository: Send + Sync {
    /// Insert code files
    fn save_all(&self, files: &[CodeFile]) -> anyhow::Result<()>;

    /// List the code files of a project, ordered by path
    fn find_by_project_id(&self, project_id: &str) -> anyhow::Result<Vec<CodeFile>>;

    /// Delete every code file of a project
    ///
    /// Returns the number of records removed.
    fn delete_all_by_project_id(&self, project_id: &str) -> anyhow::Result<usize>;
}

/// Combined store for projects and their code files
pub trait ProjectStore: ProjectRepository + CodeFileRepository {
    /// Delete a project together with its code files
    ///
    /// Code files go first. If that fails the project record is left alone.
    /// Backends that support transactions should override this so both
    /// deletions commit or roll back together.
    ///
    /// Returns `false` if no project had this ID.
    fn delete_project(&self, id: &str) -> anyhow::Result<bool> {
        self.delete_all_by_project_id(id)?;
        self.delete_by_id(id)
    }
}
