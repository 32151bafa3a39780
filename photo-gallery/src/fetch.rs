//! HTTP resource fetcher used by the browser photo store.

use crate::capabilities::{CapabilityFuture, ResourceFetcher};
use crate::error::{GalleryResult, PhotoGalleryError};

/// Fetches resource references with a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ResourceFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> CapabilityFuture<'a, GalleryResult<Vec<u8>>> {
        Box::pin(async move {
            log::debug!("Fetching {}", url);
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| PhotoGalleryError::Fetch(format!("Request to {} failed: {}", url, e)))?
                .error_for_status()
                .map_err(|e| PhotoGalleryError::Fetch(format!("{} returned {}", url, e)))?;

            let bytes = response
                .bytes()
                .await
                .map_err(|e| PhotoGalleryError::Fetch(format!("Reading {} failed: {}", url, e)))?;
            Ok(bytes.to_vec())
        })
    }
}
