pub mod tagger;
pub mod txt2img;

use crate::{
    config::WebuiConfig,
    error::{Result, SdError},
    models::LoginResponse,
};
use reqwest::Client;

pub use tagger::TaggerClient;
pub use txt2img::Txt2ImgClient;

const LOGIN_ENDPOINT: &str = "/login/";

/// Connection to a Stable Diffusion WebUI instance. One shared HTTP client
/// (with a cookie store, since the WebUI keeps authenticated sessions in a
/// cookie) backs every endpoint client.
#[derive(Clone, Debug)]
pub struct WebuiClient {
    txt2img_client: Txt2ImgClient,
    tagger_client: TaggerClient,
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl WebuiClient {
    pub fn new(config: WebuiConfig) -> Result<Self> {
        let host = config
            .host
            .ok_or_else(|| SdError::ConfigError("WebUI host is required".into()))?;
        let base_url = host.trim_end_matches('/').to_string();

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| SdError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        let credentials = match (config.username, config.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        };

        Ok(Self {
            txt2img_client: Txt2ImgClient::new(client.clone(), base_url.clone()),
            tagger_client: TaggerClient::new(client.clone(), base_url.clone()),
            client,
            base_url,
            credentials,
        })
    }

    pub fn txt2img(&self) -> &Txt2ImgClient {
        &self.txt2img_client
    }

    pub fn tagger(&self) -> &TaggerClient {
        &self.tagger_client
    }

    /// Logs in with the configured credentials and reports whether the
    /// backend accepted them. The session cookie lands in the shared jar and
    /// rides along on subsequent calls. A client without a full credential
    /// pair is treated as already authenticated.
    pub async fn login(&self) -> Result<bool> {
        let (username, password) = match &self.credentials {
            Some(credentials) => credentials,
            None => return Ok(true),
        };

        log::info!("Logging in to the WebUI as {}", username);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, LOGIN_ENDPOINT))
            .form(&[("username", username.as_str()), ("password", password.as_str())])
            .send()
            .await
            .map_err(|e| SdError::BackendUnavailable(format!("login request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SdError::BackendError(format!(
                "login returned status {}",
                response.status()
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| SdError::BackendError(format!("failed to parse login response: {}", e)))?;

        Ok(body.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn missing_host_is_a_config_error() {
        let err = WebuiClient::new(WebuiConfig::new()).unwrap_err();
        assert!(matches!(err, SdError::ConfigError(_)));
    }

    #[tokio::test]
    async fn login_without_credentials_is_skipped() {
        // Points at a closed port: a skipped login must never touch the
        // network.
        let client =
            WebuiClient::new(WebuiConfig::new().with_host("http://127.0.0.1:1")).unwrap();
        assert!(client.login().await.unwrap());
    }

    #[tokio::test]
    async fn login_with_half_a_credential_pair_is_skipped() {
        let mut config = WebuiConfig::new().with_host("http://127.0.0.1:1");
        config.username = Some("painter".to_string());

        let client = WebuiClient::new(config).unwrap();
        assert!(client.login().await.unwrap());
    }

    #[tokio::test]
    async fn login_posts_form_encoded_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/"))
            .and(body_string_contains("username=painter"))
            .and(body_string_contains("password=secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let config = WebuiConfig::new()
            .with_host(server.uri())
            .with_credentials("painter", "secret");
        let client = WebuiClient::new(config).unwrap();
        assert!(client.login().await.unwrap());
    }

    #[tokio::test]
    async fn rejected_login_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
            .mount(&server)
            .await;

        let config = WebuiConfig::new()
            .with_host(server.uri())
            .with_credentials("painter", "wrong");
        let client = WebuiClient::new(config).unwrap();
        assert!(!client.login().await.unwrap());
    }

    #[tokio::test]
    async fn trailing_slash_on_the_host_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sdapi/v1/txt2img"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "images": ["aGVsbG8="] })),
            )
            .mount(&server)
            .await;

        let config = WebuiConfig::new().with_host(format!("{}/", server.uri()));
        let client = WebuiClient::new(config).unwrap();
        assert_eq!(client.txt2img().generate("x").await.unwrap(), "aGVsbG8=");
    }
}
