//! repo-importer - Imports git repositories as archived, searchable projects
//!
//! A project is created from a clone URL. The repository is cloned into a
//! scratch directory, stripped of its `.git` metadata, zipped and uploaded to
//! a blob store; its text files are ingested and the project record is
//! persisted with the archive's download URL.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod bootstrap;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
