use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::{
    error::Result,
    fetch::ImageFetcher,
    session::{ChatSession, Replier},
    webui::WebuiClient,
};

pub const IMAGE_PROMPT_REPLY: &str = "Please send an image.";
pub const TIMEOUT_REPLY: &str = "Input timed out.";
pub const PARSE_FAILED_REPLY: &str = "Unable to parse an image from that message.";

/// Suggested wait for the follow-up message carrying the image; the session
/// implementation owns the actual enforcement.
pub const IMAGE_INPUT_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat frameworks embed attachments as markup with a `url="..."` attribute.
static IMAGE_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url="(.*?)""#).expect("image url pattern"));

/// Terminal states of the tagger exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggerOutcome {
    /// Tags were produced and sent back.
    Completed,
    /// The user never supplied an image.
    TimedOut,
    /// The follow-up message carried no recognizable image URL.
    ParseFailed,
}

/// Handles `tagger`: ask for an image, wait for the follow-up message,
/// extract the attachment URL, and reply with the comma-joined tag list.
pub async fn tagger<S>(
    client: &WebuiClient,
    fetcher: &ImageFetcher,
    session: &S,
) -> Result<TaggerOutcome>
where
    S: ChatSession + ?Sized,
{
    let request_id = Uuid::new_v4();
    let replier = Replier::new(session);

    replier.reply_text(IMAGE_PROMPT_REPLY).await?;

    let input = match session.await_reply(IMAGE_INPUT_TIMEOUT).await? {
        Some(input) => input,
        None => {
            log::info!("[{}] tagger: timed out waiting for an image", request_id);
            replier.reply_text(TIMEOUT_REPLY).await?;
            return Ok(TaggerOutcome::TimedOut);
        }
    };

    let image_url = match IMAGE_URL_PATTERN
        .captures(&input)
        .and_then(|captures| captures.get(1))
    {
        Some(url) => url.as_str().to_string(),
        None => {
            log::info!("[{}] tagger: no image url in {:?}", request_id, input);
            replier.reply_text(PARSE_FAILED_REPLY).await?;
            return Ok(TaggerOutcome::ParseFailed);
        }
    };

    log::info!("[{}] tagger: interrogating {}", request_id, image_url);

    let image = fetcher.fetch(&image_url).await?;
    let tags = client.tagger().interrogate(&BASE64.encode(&image)).await?;

    let tag_list = tags.keys().cloned().collect::<Vec<_>>().join(", ");
    log::info!("[{}] tagger: {} tags", request_id, tags.len());
    replier.reply_text(tag_list).await?;

    Ok(TaggerOutcome::Completed)
}
