//! Core domain logic for repo-importer
//!
//! This module contains the import pipeline and project operations.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Project, ImportState, CodeFile)
//! - `services/` - Import pipeline and project orchestration
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
