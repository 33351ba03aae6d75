use async_trait::async_trait;

use crate::{
    domain::ChatId,
    messaging::types::{MessagingCapabilities, TextFormat},
    Result,
};

/// Outbound side of the chat transport.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_text(&self, chat_id: ChatId, text: &str, format: TextFormat) -> Result<()>;
}
