pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logger;
pub mod models;
pub mod session;
pub mod webui;

pub use commands::TaggerOutcome;
pub use config::WebuiConfig;
pub use error::{Result, SdError};
pub use fetch::ImageFetcher;
pub use session::{ChatSession, FnSession, MessageContent, OutgoingMessage, Replier};
pub use webui::{TaggerClient, Txt2ImgClient, WebuiClient};
