use std::env;
use std::fs;
use std::sync::{Arc, Mutex};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures::FutureExt;
use sdbot::{commands, FnSession, MessageContent, WebuiClient, WebuiConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    sdbot::logger::init_with_config(
        sdbot::logger::LoggerConfig::development().with_level(sdbot::logger::LogLevel::Debug),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    sdbot::logger::log_startup_info("sdbot", env!("CARGO_PKG_VERSION"));

    if env::var("SD_WEBUI_HOST").is_err() {
        log::error!("❌ SD_WEBUI_HOST is not set, e.g. SD_WEBUI_HOST=http://127.0.0.1:7860");
    }

    let config = WebuiConfig::from_env();
    sdbot::logger::log_config_info(&config);

    log::info!("🔄 Creating WebUI client...");
    let client = match WebuiClient::new(config) {
        Ok(client) => {
            log::info!("✅ WebUI client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize WebUI client: {}", e);
            return Err(e.into());
        }
    };

    match client.login().await {
        Ok(true) => log::info!("🔐 Logged in (or no login required)"),
        Ok(false) => log::warn!("⚠️  The WebUI rejected the configured credentials"),
        Err(e) => log::error!("❌ Login failed: {}", e),
    }

    // Drive the imagine command through a console session that logs every
    // reply and captures the generated PNG.
    let captured = Arc::new(Mutex::new(None::<Vec<u8>>));
    let sink = captured.clone();
    let session = FnSession::new(
        "console",
        Box::new(move |message| {
            let sink = sink.clone();
            async move {
                match message.content {
                    MessageContent::Text(text) => {
                        log::info!("💬 Reply (quoting {:?}): {}", message.quote, text);
                    }
                    MessageContent::Image { data, mime } => {
                        log::info!(
                            "🖼️  Reply (quoting {:?}): {} attachment, {} bytes",
                            message.quote,
                            mime,
                            data.len()
                        );
                        *sink.lock().unwrap() = Some(data);
                    }
                }
                Ok(())
            }
            .boxed()
        }),
    );

    let prompt = env::args()
        .nth(1)
        .unwrap_or_else(|| "a lighthouse at dusk, digital art".to_string());

    log::info!("🎨 Running imagine for prompt: {}", prompt);
    if let Err(e) = commands::imagine(&client, &session, &prompt).await {
        log::error!("❌ imagine failed: {}", e);
        return Err(e.into());
    }

    let image = captured.lock().unwrap().take();
    if let Some(image) = image {
        let filename = format!("imagine_{}.png", chrono::Utc::now().timestamp());
        match fs::write(&filename, &image) {
            Ok(_) => log::info!("💾 Image saved to: {}", filename),
            Err(e) => log::error!("❌ Failed to save image: {}", e),
        }

        log::info!("🏷️  Interrogating the generated image...");
        match client.tagger().interrogate(&BASE64.encode(&image)).await {
            Ok(tags) => {
                log::info!(
                    "✅ Tags: {}",
                    tags.keys().cloned().collect::<Vec<_>>().join(", ")
                );
            }
            Err(e) => {
                log::error!("❌ Interrogation failed: {}", e);
                log::warn!("💡 The tagger extension might not be installed on this WebUI");
            }
        }
    }

    log::info!("🎉 Done");
    Ok(())
}
