//! Blob store adapters
//!
//! - [`filesystem`] - Local directory store (`file://` references)
//! - `gcs` - Google Cloud Storage over HTTP (feature `gcs`)

pub mod filesystem;
#[cfg(feature = "gcs")]
pub mod gcs;

pub use filesystem::FilesystemBlobStore;
#[cfg(feature = "gcs")]
pub use gcs::GcsBlobStore;
