//! Domain models for repo-importer
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Project`] - An imported source repository
//! - [`NewProject`] - A request to import one
//! - [`ImportState`] - Where a project is in its import lifecycle
//! - [`CodeFile`] - A text file read out of an imported repository

mod code_file;
mod import_state;
mod project;

pub use code_file::CodeFile;
pub use import_state::ImportState;
pub use project::{NewProject, Project, repo_name_from_url};
