//! Business logic services
//!
//! Orchestration logic that drives the port traits. Services never talk to
//! git, object storage or a database directly.
//!
//! - [`importer`] - Clone, archive, upload pipeline
//! - [`project_service`] - Import orchestration and project CRUD
//! - [`archive`] - Zip packing of a checkout
//! - [`scratch`] - Scoped scratch directories

pub mod archive;
pub mod error;
pub mod importer;
pub mod project_service;
pub mod scratch;

pub use archive::{Archive, zip_directory};
pub use error::{ImportError, ProjectError};
pub use importer::{ImportOutcome, Importer, ImporterConfig, strip_vcs_metadata};
pub use project_service::ProjectService;
pub use scratch::ScratchDir;
