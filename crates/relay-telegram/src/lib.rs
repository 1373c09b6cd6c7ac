//! Telegram adapter (teloxide).
//!
//! This crate implements the `relay-core` RelayPort over the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::Recipient, ApiError, RequestError};

pub mod convert;
pub mod router;

use relay_core::{
    domain::{ChatId, MessageId, MessageRef, ThreadId, UserId},
    errors::Error,
    forward::ForwardError,
    messaging::{
        port::RelayPort,
        types::{BotIdentity, ChatLookup, ChatSummary, ForwardRequest},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramRelay {
    bot: Bot,
}

impl TelegramRelay {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }
}

/// Map a failed forward call onto the local taxonomy.
pub fn forward_error(e: &RequestError) -> ForwardError {
    match e {
        RequestError::Api(api) => match api {
            ApiError::ChatNotFound => ForwardError::DestinationNotFound,
            ApiError::NotEnoughRightsToPostMessages => ForwardError::InsufficientRights,
            ApiError::MessageToForwardNotFound => ForwardError::SourceMessageGone,
            ApiError::BotBlocked | ApiError::BotKicked | ApiError::BotKickedFromSupergroup => {
                ForwardError::AccessForbidden
            }
            other => ForwardError::from_description(&other.to_string()),
        },
        other => ForwardError::Unknown(other.to_string()),
    }
}

#[async_trait]
impl RelayPort for TelegramRelay {
    async fn forward_message(
        &self,
        req: ForwardRequest,
    ) -> std::result::Result<MessageRef, ForwardError> {
        let mut call = self.bot.forward_message(
            Self::tg_chat(req.to_chat),
            Self::tg_chat(req.from_chat),
            Self::tg_msg_id(req.message_id),
        );
        if let Some(thread) = req.to_thread {
            call = call.message_thread_id(thread.0);
        }

        let msg = call.await.map_err(|e| forward_error(&e))?;
        Ok(MessageRef {
            chat_id: req.to_chat,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        thread_id: Option<ThreadId>,
        text: &str,
    ) -> Result<MessageRef> {
        let mut call = self
            .bot
            .send_message(Self::tg_chat(chat_id), text.to_string());
        if let Some(thread) = thread_id {
            call = call.message_thread_id(thread.0);
        }

        let msg = call.await.map_err(Self::map_err)?;
        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn get_chat(&self, chat: ChatLookup) -> Result<ChatSummary> {
        let recipient = match chat {
            ChatLookup::Id(id) => Recipient::Id(Self::tg_chat(id)),
            ChatLookup::Handle(handle) => Recipient::ChannelUsername(format!("@{handle}")),
        };
        let chat = self
            .bot
            .get_chat(recipient)
            .await
            .map_err(Self::map_err)?;
        Ok(convert::chat_summary(&chat))
    }

    async fn get_me(&self) -> Result<BotIdentity> {
        let me = self.bot.get_me().await.map_err(Self::map_err)?;
        Ok(BotIdentity {
            id: UserId(me.user.id.0 as i64),
            username: me.username().to_string(),
        })
    }
}
