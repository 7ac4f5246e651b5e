//! SQLite project store
//!
//! Implements `ProjectRepository`, `CodeFileRepository` and `ProjectStore`
//! on a single rusqlite connection. Project deletion runs in one transaction
//! so code files and the project record disappear together.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::core::models::{CodeFile, ImportState, Project};
use crate::core::ports::{CodeFileRepository, ProjectRepository, ProjectStore};

const SCHEMA_VERSION: u32 = 1;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id                TEXT PRIMARY KEY,
    source            TEXT NOT NULL,
    name              TEXT,
    description       TEXT,
    created           TEXT NOT NULL,
    state             TEXT NOT NULL,
    download_url      TEXT,
    working_directory TEXT,
    failure_reason    TEXT
);
CREATE INDEX IF NOT EXISTS idx_projects_created ON projects (created);

CREATE TABLE IF NOT EXISTS code_files (
    id         TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    path       TEXT NOT NULL,
    contents   TEXT NOT NULL,
    size       INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_code_files_project ON code_files (project_id);
";

const PROJECT_COLUMNS: &str =
    "id, source, name, description, created, state, download_url, working_directory, failure_reason";

/// SQLite-backed store for projects and code files
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        Self::bootstrap(conn)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> anyhow::Result<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(SCHEMA).context("failed to create schema")?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        debug!("database schema at version {SCHEMA_VERSION}");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Schema version recorded in the database
    pub fn schema_version(&self) -> anyhow::Result<u32> {
        let conn = self.lock()?;
        Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}

impl ProjectRepository for SqliteStore {
    fn save(&self, project: &Project) -> anyhow::Result<()> {
        let (state, download_url, working_directory, failure_reason) = match &project.state {
            ImportState::Pending => ("pending", None, None, None),
            ImportState::Imported {
                download_url,
                working_directory,
            } => (
                "imported",
                Some(download_url.as_str()),
                Some(working_directory.to_string_lossy().to_string()),
                None,
            ),
            ImportState::Failed { reason } => ("failed", None, None, Some(reason.as_str())),
        };

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO projects (id, source, name, description, created, state,
                                   download_url, working_directory, failure_reason)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT (id) DO UPDATE SET
                 source = excluded.source,
                 name = excluded.name,
                 description = excluded.description,
                 created = excluded.created,
                 state = excluded.state,
                 download_url = excluded.download_url,
                 working_directory = excluded.working_directory,
                 failure_reason = excluded.failure_reason",
            params![
                project.id,
                project.source,
                project.name,
                project.description,
                format_timestamp(project.created),
                state,
                download_url,
                working_directory,
                failure_reason,
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Project>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                params![id],
                ProjectRow::read,
            )
            .optional()?;
        row.map(ProjectRow::into_project).transpose()
    }

    fn find_all_by_created_desc(&self) -> anyhow::Result<Vec<Project>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created DESC, rowid DESC"
        ))?;
        let rows = stmt.query_map([], ProjectRow::read)?.collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ProjectRow::into_project).collect()
    }

    fn delete_by_id(&self, id: &str) -> anyhow::Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

impl CodeFileRepository for SqliteStore {
    fn save_all(&self, files: &[CodeFile]) -> anyhow::Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO code_files (id, project_id, path, contents, size)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for file in files {
                stmt.execute(params![
                    file.id,
                    file.project_id,
                    file.path,
                    file.contents,
                    i64::try_from(file.size)?,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn find_by_project_id(&self, project_id: &str) -> anyhow::Result<Vec<CodeFile>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, project_id, path, contents, size FROM code_files
             WHERE project_id = ?1 ORDER BY path",
        )?;
        let rows = stmt
            .query_map(params![project_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, project_id, path, contents, size)| {
                Ok(CodeFile {
                    id,
                    project_id,
                    path,
                    contents,
                    size: u64::try_from(size)?,
                })
            })
            .collect()
    }

    fn delete_all_by_project_id(&self, project_id: &str) -> anyhow::Result<usize> {
        let conn = self.lock()?;
        Ok(conn.execute("DELETE FROM code_files WHERE project_id = ?1", params![project_id])?)
    }
}

impl ProjectStore for SqliteStore {
    fn delete_project(&self, id: &str) -> anyhow::Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let files = tx.execute("DELETE FROM code_files WHERE project_id = ?1", params![id])?;
        let removed = tx.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        tx.commit()?;

        debug!("deleted project {id} ({files} code file(s))");
        Ok(removed > 0)
    }
}

/// Raw column values of a `projects` row
struct ProjectRow {
    id: String,
    source: String,
    name: Option<String>,
    description: Option<String>,
    created: String,
    state: String,
    download_url: Option<String>,
    working_directory: Option<String>,
    failure_reason: Option<String>,
}

impl ProjectRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            source: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            created: row.get(4)?,
            state: row.get(5)?,
            download_url: row.get(6)?,
            working_directory: row.get(7)?,
            failure_reason: row.get(8)?,
        })
    }

    fn into_project(self) -> anyhow::Result<Project> {
        let created = DateTime::parse_from_rfc3339(&self.created)
            .with_context(|| format!("bad timestamp {:?} on project {}", self.created, self.id))?
            .with_timezone(&Utc);

        let state = match self.state.as_str() {
            "pending" => ImportState::Pending,
            "imported" => ImportState::Imported {
                download_url: self.download_url.unwrap_or_default(),
                working_directory: PathBuf::from(self.working_directory.unwrap_or_default()),
            },
            "failed" => ImportState::Failed {
                reason: self.failure_reason.unwrap_or_default(),
            },
            other => anyhow::bail!("unknown state {other:?} on project {}", self.id),
        };

        Ok(Project {
            id: self.id,
            source: self.source,
            name: self.name,
            description: self.description,
            created,
            state,
        })
    }
}

/// Fixed-width RFC 3339 so that text order matches time order
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
