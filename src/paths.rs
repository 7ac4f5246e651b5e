//! Centralized path definitions for repo-importer
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.config/repo-importer/
//! └── config.toml                 # Service configuration
//!
//! ~/.local/share/repo-importer/
//! ├── projects.db                 # SQLite database (projects, code files)
//! └── blobs/                      # Filesystem blob store root
//!     └── <bucket>/<archive>.zip
//! ```
//!
//! Scratch directories live under the system temp dir unless
//! `scratch_dir` is configured.

use std::path::PathBuf;

/// Application directory name
const APP_DIR: &str = "repo-importer";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Database filename
const DATABASE_FILE: &str = "projects.db";

/// Blob store directory name
const BLOBS_DIR: &str = "blobs";

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"))
}

/// Get the config directory.
///
/// Returns `~/.config/repo-importer/`.
#[must_use]
pub fn config_dir() -> PathBuf {
    home().join(".config").join(APP_DIR)
}

/// Get the default config file path.
///
/// Returns `~/.config/repo-importer/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Get the data directory.
///
/// Returns `~/.local/share/repo-importer/`.
#[must_use]
pub fn data_dir() -> PathBuf {
    home().join(".local").join("share").join(APP_DIR)
}

/// Get the default database path.
#[must_use]
pub fn database() -> PathBuf {
    data_dir().join(DATABASE_FILE)
}

/// Get the default root of the filesystem blob store.
#[must_use]
pub fn blob_root() -> PathBuf {
    data_dir().join(BLOBS_DIR)
}
