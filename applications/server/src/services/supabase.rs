//! Supabase Storage blob store.
//!
//! Deletes objects through the Storage REST API:
//! `DELETE {url}/storage/v1/object/{bucket}/{path}`, authenticated with the
//! project's service role key.

use async_trait::async_trait;
use melodia_core::{BlobStore, MelodiaError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Blob store backed by a Supabase Storage bucket
pub struct SupabaseBlobStore {
    http: Client,
    base_url: Url,
    bucket: String,
    service_key: String,
}

impl SupabaseBlobStore {
    /// Create a client for `bucket` on the project at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(&base_url.into())
            .map_err(|e| MelodiaError::invalid_input(format!("Invalid Supabase URL: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(MelodiaError::invalid_input(
                "Supabase URL must start with http:// or https://",
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Melodia/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MelodiaError::invalid_input(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            bucket: bucket.into(),
            service_key: service_key.into(),
        })
    }

    /// Object URL with every path segment percent-encoded, so `#` or `?`
    /// in a file name stay part of the object key
    fn object_url(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MelodiaError::invalid_input("Supabase URL cannot be a base"))?
            .pop_if_empty()
            .extend(["storage", "v1", "object", self.bucket.as_str()])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

#[async_trait]
impl BlobStore for SupabaseBlobStore {
    async fn delete(&self, path: &str) -> Result<()> {
        if path.split('/').all(str::is_empty) {
            return Err(MelodiaError::invalid_input("Blob path cannot be empty"));
        }

        let url = self.object_url(path)?;
        debug!("DELETE {}", url);

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(|e| MelodiaError::storage_delete_failed(path, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::NOT_FOUND {
            warn!("Blob {} already absent from bucket {}", path, self.bucket);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MelodiaError::storage_delete_failed(
            path,
            format!("HTTP {}: {}", status.as_u16(), body),
        ))
    }
}
