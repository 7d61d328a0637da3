use std::collections::BTreeMap;

use crate::{
    error::{Result, SdError},
    logger,
    models::{InterrogateRequest, InterrogateResponse},
};
use reqwest::Client;
use serde_json::Value;

const INTERROGATE_ENDPOINT: &str = "/tagger/v1/interrogate";

#[derive(Clone, Debug)]
pub struct TaggerClient {
    client: Client,
    base_url: String,
}

impl TaggerClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Sends the base64 image with the fixed model and threshold and returns
    /// the caption/tag mapping.
    pub async fn interrogate(&self, image_base64: &str) -> Result<BTreeMap<String, Value>> {
        let _timer = logger::timer("tagger interrogate");
        let request = InterrogateRequest::with_image(image_base64);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, INTERROGATE_ENDPOINT))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                SdError::BackendUnavailable(format!("interrogate request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(SdError::BackendError(format!(
                "interrogate returned status {}",
                response.status()
            )));
        }

        let body: InterrogateResponse = response.json().await.map_err(|e| {
            SdError::BackendError(format!("failed to parse interrogate response: {}", e))
        })?;

        Ok(body.caption)
    }
}
