use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::Result;

/// A piece of outgoing message content.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Image { data: Vec<u8>, mime: String },
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn image(data: Vec<u8>, mime: impl Into<String>) -> Self {
        MessageContent::Image {
            data,
            mime: mime.into(),
        }
    }
}

/// Content plus an optional quote-reference to the message being answered.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub quote: Option<String>,
    pub content: MessageContent,
}

/// Capability surface the host chat framework injects into the command
/// handlers. `await_reply` resolves to `None` once the host's input timeout
/// fires; the timeout is owned and enforced by the implementation, the
/// argument is the handler's suggested wait.
#[async_trait]
pub trait ChatSession: Send + Sync {
    fn message_id(&self) -> &str;

    async fn send(&self, message: OutgoingMessage) -> Result<()>;

    async fn await_reply(&self, timeout: Duration) -> Result<Option<String>>;
}

/// Reply formatter: every reply goes out as exactly one send carrying a
/// quote-reference to the message that triggered the command.
pub struct Replier<'a, S: ChatSession + ?Sized> {
    message_id: String,
    session: &'a S,
}

impl<'a, S: ChatSession + ?Sized> Replier<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self {
            message_id: session.message_id().to_string(),
            session,
        }
    }

    pub async fn reply(&self, content: MessageContent) -> Result<()> {
        self.session
            .send(OutgoingMessage {
                quote: Some(self.message_id.clone()),
                content,
            })
            .await
    }

    pub async fn reply_text(&self, text: impl Into<String> + Send) -> Result<()> {
        self.reply(MessageContent::text(text)).await
    }

    pub async fn reply_image(&self, data: Vec<u8>, mime: &str) -> Result<()> {
        self.reply(MessageContent::image(data, mime)).await
    }
}

type SendFn = Box<dyn Fn(OutgoingMessage) -> BoxFuture<'static, Result<()>> + Send + Sync>;
type PromptFn = Box<dyn Fn(Duration) -> BoxFuture<'static, Result<Option<String>>> + Send + Sync>;

/// Closure-backed session for hosts that hand out bare send/prompt functions
/// instead of implementing the trait. Without a prompt function every
/// `await_reply` reports a timeout.
pub struct FnSession {
    message_id: String,
    send_fn: SendFn,
    prompt_fn: Option<PromptFn>,
}

impl FnSession {
    pub fn new(message_id: impl Into<String>, send_fn: SendFn) -> Self {
        Self {
            message_id: message_id.into(),
            send_fn,
            prompt_fn: None,
        }
    }

    pub fn with_prompt_fn(mut self, prompt_fn: PromptFn) -> Self {
        self.prompt_fn = Some(prompt_fn);
        self
    }
}

#[async_trait]
impl ChatSession for FnSession {
    fn message_id(&self) -> &str {
        &self.message_id
    }

    async fn send(&self, message: OutgoingMessage) -> Result<()> {
        (self.send_fn)(message).await
    }

    async fn await_reply(&self, timeout: Duration) -> Result<Option<String>> {
        match &self.prompt_fn {
            Some(prompt_fn) => prompt_fn(timeout).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Session double: records every send, plays back scripted replies, and
    /// reports a timeout once the script runs out.
    pub(crate) struct MockSession {
        message_id: String,
        replies: Mutex<VecDeque<Option<String>>>,
        sent: Mutex<Vec<OutgoingMessage>>,
    }

    impl MockSession {
        pub fn new(message_id: &str) -> Self {
            Self {
                message_id: message_id.to_string(),
                replies: Mutex::new(VecDeque::new()),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn with_replies(self, replies: Vec<Option<String>>) -> Self {
            *self.replies.lock().unwrap() = replies.into();
            self
        }

        pub fn sent(&self) -> Vec<OutgoingMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatSession for MockSession {
        fn message_id(&self) -> &str {
            &self.message_id
        }

        async fn send(&self, message: OutgoingMessage) -> Result<()> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        async fn await_reply(&self, _timeout: Duration) -> Result<Option<String>> {
            Ok(self.replies.lock().unwrap().pop_front().flatten())
        }
    }
}
