//! Service configuration
//!
//! Config is stored at `~/.config/repo-importer/config.toml` unless a path is
//! given explicitly. Missing files and missing keys fall back to defaults, and
//! a few settings can be overridden from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::{GitFetcherConfig, IngestConfig};
use crate::core::services::ImporterConfig;
use crate::paths;

/// Bucket archives are uploaded to when none is configured
pub const DEFAULT_BUCKET: &str = "repo-archives";

/// Environment variable overriding the bucket
pub const ENV_BUCKET: &str = "REPO_IMPORTER_BUCKET";
/// Environment variable overriding the database path
pub const ENV_DATABASE: &str = "REPO_IMPORTER_DATABASE";
/// Environment variable overriding the scratch parent directory
pub const ENV_SCRATCH_DIR: &str = "REPO_IMPORTER_SCRATCH_DIR";
/// Environment variable overriding the filesystem blob root
pub const ENV_BLOB_ROOT: &str = "REPO_IMPORTER_BLOB_ROOT";

/// Top-level service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bucket archives are uploaded to
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// SQLite database path
    #[serde(default = "paths::database")]
    pub database: PathBuf,
    /// Parent directory for scratch checkouts (system temp if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
    /// Blob store backend
    #[serde(default)]
    pub blob: BlobConfig,
    /// Ingestion limits
    #[serde(default)]
    pub ingest: IngestSettings,
    /// Clone settings
    #[serde(default)]
    pub git: GitSettings,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            database: paths::database(),
            scratch_dir: None,
            blob: BlobConfig::default(),
            ingest: IngestSettings::default(),
            git: GitSettings::default(),
        }
    }
}

/// Blob store backend selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum BlobConfig {
    /// Archives are written below a local directory
    Filesystem {
        /// Root directory; buckets are subdirectories
        #[serde(default = "paths::blob_root")]
        root: PathBuf,
    },
    /// Archives are uploaded to Google Cloud Storage (feature `gcs`)
    Gcs {
        /// Storage API endpoint
        #[serde(default = "default_gcs_endpoint")]
        endpoint: String,
        /// OAuth bearer token
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
}

fn default_gcs_endpoint() -> String {
    "https://storage.googleapis.com".to_string()
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self::Filesystem {
            root: paths::blob_root(),
        }
    }
}

/// Ingestion settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSettings {
    /// Files larger than this many bytes are not ingested
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

const fn default_max_file_bytes() -> u64 {
    crate::adapters::ingest::DEFAULT_MAX_FILE_BYTES
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

/// Clone settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSettings {
    /// Shallow clone depth (full history when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Token for HTTPS remotes that require authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ServiceConfig {
    /// Get the default config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from `path` (or the default location) and apply
    /// environment overrides
    ///
    /// A missing file yields defaults. A file that exists but cannot be
    /// parsed is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a config file without applying overrides
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides looked up by environment variable name
    ///
    /// Empty values are ignored. The blob root override only applies to the
    /// filesystem backend.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bucket) = lookup(ENV_BUCKET) {
            self.bucket = bucket;
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            self.database = PathBuf::from(database);
        }
        if let Some(scratch) = lookup(ENV_SCRATCH_DIR) {
            self.scratch_dir = Some(PathBuf::from(scratch));
        }
        if let (Some(blob_root), BlobConfig::Filesystem { root }) =
            (lookup(ENV_BLOB_ROOT), &mut self.blob)
        {
            *root = PathBuf::from(blob_root);
        }
    }

    /// Importer settings derived from this config
    #[must_use]
    pub fn importer(&self) -> ImporterConfig {
        ImporterConfig {
            bucket: self.bucket.clone(),
            scratch_parent: self.scratch_dir.clone(),
        }
    }

    /// Ingestion limits derived from this config
    #[must_use]
    pub const fn ingest(&self) -> IngestConfig {
        IngestConfig {
            max_file_bytes: self.ingest.max_file_bytes,
        }
    }

    /// Git fetcher settings derived from this config
    #[must_use]
    pub fn git(&self) -> GitFetcherConfig {
        GitFetcherConfig {
            depth: self.git.depth,
            token: self.git.token.clone(),
        }
    }
}
