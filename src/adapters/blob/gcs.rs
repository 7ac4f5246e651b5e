//! Google Cloud Storage blob store
//!
//! Uploads through the JSON API simple-media endpoint and returns the public
//! object URL. Available with the `gcs` feature.

use std::io::Read;

use anyhow::Context;
use log::debug;
use reqwest::blocking::Body;
use serde::Deserialize;

use crate::core::ports::BlobStore;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Blob store backed by a GCS-compatible HTTP API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsBlobStore {
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadedObject {
    name: String,
    bucket: String,
}

impl GcsBlobStore {
    /// Create a store talking to `endpoint`, authenticating with a bearer token if given
    #[must_use]
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Public URL of an object
    #[must_use]
    pub fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("{}/{bucket}/{name}", self.endpoint)
    }
}

impl Default for GcsBlobStore {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

impl BlobStore for GcsBlobStore {
    fn upload(
        &self,
        body: Box<dyn Read + Send>,
        size: u64,
        name: &str,
        bucket: &str,
    ) -> anyhow::Result<String> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/upload/storage/v1/b/{bucket}/o", self.endpoint),
            &[("uploadType", "media"), ("name", name)],
        )?;

        // The blocking client must be created and dropped outside the async runtime
        let client = reqwest::blocking::Client::new();
        let mut request = client
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/zip")
            .body(Body::sized(body, size));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let object: UploadedObject = request
            .send()
            .with_context(|| format!("upload request to {url} failed"))?
            .error_for_status()?
            .json()
            .context("unexpected upload response")?;

        debug!("uploaded {size} bytes to gs://{}/{}", object.bucket, object.name);
        Ok(self.public_url(&object.bucket, &object.name))
    }
}
