use crate::error::{Result, SdError};
use reqwest::Client;

/// Hard cap on downloaded image size. The interrogation endpoint gets the
/// whole payload re-encoded as base64, so unbounded downloads are rejected
/// here instead of at the backend.
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// Downloads raw image bytes from an arbitrary URL.
#[derive(Clone)]
pub struct ImageFetcher {
    client: Client,
}

impl Default for ImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SdError::FetchError(format!("image download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SdError::FetchError(format!(
                "image download returned status {}",
                response.status()
            )));
        }

        if let Some(length) = response.content_length() {
            if length as usize > MAX_IMAGE_BYTES {
                return Err(SdError::FetchError(format!(
                    "image of {} bytes exceeds the {} byte limit",
                    length, MAX_IMAGE_BYTES
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SdError::FetchError(format!("image download failed: {}", e)))?;

        // Content-Length is advisory; check what actually arrived.
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(SdError::FetchError(format!(
                "image of {} bytes exceeds the {} byte limit",
                bytes.len(),
                MAX_IMAGE_BYTES
            )));
        }

        Ok(bytes.to_vec())
    }
}
