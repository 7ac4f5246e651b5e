//! Command implementations

mod config;
mod project;

pub use config::config;
pub use project::{delete, files, import, list, show};
