//! Blob store port
//!
//! Defines the interface for uploading archives to object storage.

use std::io::Read;

/// Object storage for uploaded archives
///
/// Implementations stream the reader to the backend and return a reference
/// (URL or other addressable string) that can later be used to download it.
pub trait BlobStore: Send + Sync {
    /// Upload `size` bytes read from `body` as object `name` in `bucket`
    ///
    /// Returns the public or addressable reference of the stored object.
    fn upload(
        &self,
        body: Box<dyn Read + Send>,
        size: u64,
        name: &str,
        bucket: &str,
    ) -> anyhow::Result<String>;
}
