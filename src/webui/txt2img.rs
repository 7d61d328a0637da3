use crate::{
    error::{Result, SdError},
    models::{Txt2ImgRequest, Txt2ImgResponse},
};
use reqwest::Client;

const TXT2IMG_ENDPOINT: &str = "/sdapi/v1/txt2img";

#[derive(Clone, Debug)]
pub struct Txt2ImgClient {
    client: Client,
    base_url: String,
}

impl Txt2ImgClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Sends the prompt with the fixed generation defaults and returns the
    /// first base64 image of the batch.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with(Txt2ImgRequest::with_prompt(prompt)).await
    }

    pub async fn generate_with(&self, request: Txt2ImgRequest) -> Result<String> {
        log::info!(
            "Generating {}x{} image, prompt of {} chars",
            request.width,
            request.height,
            request.prompt.len()
        );

        let response = self
            .client
            .post(format!("{}{}", self.base_url, TXT2IMG_ENDPOINT))
            .json(&request)
            .send()
            .await
            .map_err(|e| SdError::BackendUnavailable(format!("txt2img request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SdError::BackendError(format!(
                "txt2img returned status {}",
                response.status()
            )));
        }

        let body: Txt2ImgResponse = response.json().await.map_err(|e| {
            SdError::BackendError(format!("failed to parse txt2img response: {}", e))
        })?;

        body.images
            .into_iter()
            .next()
            .ok_or_else(|| SdError::BackendError("txt2img response contained no images".into()))
    }
}
