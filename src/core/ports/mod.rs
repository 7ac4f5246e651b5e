//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the import pipeline and the
//! systems it drives (git transport, object storage, persistence, ingestion).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The services depend only on these traits, never on concrete
//! implementations. This enables:
//!
//! - **Testability**: Mock implementations for unit tests
//! - **Flexibility**: Swap implementations without changing business logic
//! - **Clarity**: Clear boundaries between layers

mod blob_store;
mod fetcher;
mod file_ingestion;
mod project_repo;

pub use blob_store::BlobStore;
pub use fetcher::RepositoryFetcher;
pub use file_ingestion::FileIngestion;
pub use project_repo::{CodeFileRepository, ProjectRepository, ProjectStore};
