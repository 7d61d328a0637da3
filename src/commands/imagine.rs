use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use uuid::Uuid;

use crate::{
    error::{Result, SdError},
    session::{ChatSession, Replier},
    webui::WebuiClient,
};

pub const GENERATION_FAILED_REPLY: &str = "Image generation failed, please try again later.";

pub const IMAGE_MIME: &str = "image/png";

/// Handles `imagine <prompt>`: undo the host framework's markup escaping,
/// generate, and reply with the image quoted against the triggering message.
/// Generation failures produce a failure reply before the error is handed
/// back to the host.
pub async fn imagine<S>(client: &WebuiClient, session: &S, prompt: &str) -> Result<()>
where
    S: ChatSession + ?Sized,
{
    let request_id = Uuid::new_v4();
    let replier = Replier::new(session);

    let prompt = html_escape::decode_html_entities(prompt);
    log::info!("[{}] imagine: prompt {:?}", request_id, prompt);

    let image = match generate_png(client, &prompt).await {
        Ok(image) => image,
        Err(e) => {
            log::error!("[{}] imagine: {}", request_id, e);
            replier.reply_text(GENERATION_FAILED_REPLY).await?;
            return Err(e);
        }
    };

    log::info!("[{}] imagine: replying with {} bytes", request_id, image.len());
    replier.reply_image(image, IMAGE_MIME).await
}

async fn generate_png(client: &WebuiClient, prompt: &str) -> Result<Vec<u8>> {
    let image_base64 = client.txt2img().generate(prompt).await?;
    BASE64
        .decode(image_base64.as_bytes())
        .map_err(|e| SdError::BackendError(format!("backend returned invalid base64 image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WebuiConfig;
    use crate::session::testing::MockSession;
    use crate::session::MessageContent;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WebuiClient {
        WebuiClient::new(WebuiConfig::new().with_host(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn decodes_html_entities_before_generation() {
        let server = MockServer::start().await;
        let png = BASE64.encode(b"not a real png");
        Mock::given(method("POST"))
            .and(path("/sdapi/v1/txt2img"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "images": [png] })))
            .expect(1)
            .mount(&server)
            .await;

        let session = MockSession::new("m1");
        imagine(&client_for(&server), &session, "a &amp; b").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(body["prompt"], "a & b");
    }

    #[tokio::test]
    async fn replies_with_the_decoded_png_attachment() {
        let server = MockServer::start().await;
        let png = BASE64.encode(b"not a real png");
        Mock::given(method("POST"))
            .and(path("/sdapi/v1/txt2img"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "images": [png] })))
            .mount(&server)
            .await;

        let session = MockSession::new("m2");
        imagine(&client_for(&server), &session, "a castle").await.unwrap();

        let sent = session.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].quote.as_deref(), Some("m2"));
        assert_eq!(
            sent[0].content,
            MessageContent::image(b"not a real png".to_vec(), IMAGE_MIME)
        );
    }

    #[tokio::test]
    async fn backend_failure_produces_a_failure_reply_and_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sdapi/v1/txt2img"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let session = MockSession::new("m3");
        let err = imagine(&client_for(&server), &session, "a castle")
            .await
            .unwrap_err();
        assert!(matches!(err, SdError::BackendError(_)));

        let sent = session.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].content,
            MessageContent::text(GENERATION_FAILED_REPLY)
        );
    }

    #[tokio::test]
    async fn invalid_base64_from_the_backend_is_a_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sdapi/v1/txt2img"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "images": ["!!not base64!!"] })),
            )
            .mount(&server)
            .await;

        let session = MockSession::new("m4");
        let err = imagine(&client_for(&server), &session, "a castle")
            .await
            .unwrap_err();
        assert!(matches!(err, SdError::BackendError(_)));
    }
}
