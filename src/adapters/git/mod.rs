//! Git integration adapter
//!
//! Implements `RepositoryFetcher` with libgit2.

use std::path::Path;

use git2::build::RepoBuilder;
use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks};
use log::debug;

use crate::core::ports::RepositoryFetcher;

/// Clone settings
#[derive(Debug, Clone, Default)]
pub struct GitFetcherConfig {
    /// Shallow clone depth (full history when unset)
    pub depth: Option<u32>,
    /// Token sent as the password for HTTPS remotes that ask for credentials
    pub token: Option<String>,
}

/// libgit2-based repository fetcher
#[derive(Debug, Clone, Default)]
pub struct GitFetcher {
    config: GitFetcherConfig,
}

impl GitFetcher {
    /// Create a new git fetcher
    #[must_use]
    pub const fn new(config: GitFetcherConfig) -> Self {
        Self { config }
    }

    fn fetch_options(&self) -> FetchOptions<'_> {
        let mut callbacks = RemoteCallbacks::new();
        if let Some(token) = self.config.token.as_deref() {
            callbacks.credentials(move |_url, username_from_url, allowed| {
                if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
                    Cred::userpass_plaintext(username_from_url.unwrap_or("x-access-token"), token)
                } else {
                    Cred::default()
                }
            });
        }

        let mut options = FetchOptions::new();
        options.remote_callbacks(callbacks);
        if let Some(depth) = self.config.depth {
            options.depth(i32::try_from(depth).unwrap_or(i32::MAX));
        }
        options
    }
}

impl RepositoryFetcher for GitFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> anyhow::Result<()> {
        let mut builder = RepoBuilder::new();
        builder.fetch_options(self.fetch_options());

        let repo = builder.clone(url, destination)?;
        let head = repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .map_or_else(|| "unborn".to_string(), |oid| oid.to_string());
        debug!("cloned {url} at {head}");

        // Release the repository handle before the caller touches .git
        drop(repo);
        Ok(())
    }
}
