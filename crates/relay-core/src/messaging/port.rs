use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef, ThreadId},
    forward::ForwardError,
    messaging::types::{BotIdentity, ChatLookup, ChatSummary, ForwardRequest},
    Result,
};

/// The platform calls the relay engine needs.
///
/// One long-lived implementation is created at startup and shared by the
/// forwarder and the command responder.
#[async_trait]
pub trait RelayPort: Send + Sync {
    /// Forward by reference, keeping the original attribution.
    async fn forward_message(
        &self,
        req: ForwardRequest,
    ) -> std::result::Result<MessageRef, ForwardError>;

    async fn send_text(
        &self,
        chat_id: ChatId,
        thread_id: Option<ThreadId>,
        text: &str,
    ) -> Result<MessageRef>;

    async fn get_chat(&self, chat: ChatLookup) -> Result<ChatSummary>;

    async fn get_me(&self) -> Result<BotIdentity>;
}
