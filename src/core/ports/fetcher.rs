//! Repository fetcher port
//!
//! Defines the interface for cloning a remote repository onto local disk.

use std::path::Path;

/// Clones source repositories
///
/// Implementations handle the transport (git over https, ssh, local paths).
pub trait RepositoryFetcher: Send + Sync {
    /// Clone `url` into `destination`, an existing empty directory
    ///
    /// Any repository handle opened for the clone must be released before
    /// this returns, so callers are free to modify or delete `destination`.
    fn fetch(&self, url: &str, destination: &Path) -> anyhow::Result<()>;
}
