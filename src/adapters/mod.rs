//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `git/` - Repository cloning with libgit2
//! - `blob/` - Archive upload (local directory, GCS)
//! - `sqlite/` - Project and code file persistence
//! - `ingest/` - Code file ingestion from a checkout

pub mod blob;
pub mod git;
pub mod ingest;
pub mod sqlite;

pub use blob::FilesystemBlobStore;
pub use git::{GitFetcher, GitFetcherConfig};
pub use ingest::{CodeFileIngestor, IngestConfig};
pub use sqlite::SqliteStore;
