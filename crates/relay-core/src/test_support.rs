//! In-memory port used by the engine tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    config::{Config, Destination, SourceChannel},
    domain::{ChatId, MessageId, MessageRef, ThreadId, UserId},
    errors::Error,
    forward::ForwardError,
    messaging::{
        port::RelayPort,
        types::{BotIdentity, ChatLookup, ChatSummary, ForwardRequest},
    },
    update::{ChatKind, Content, OriginChat, Post},
    Result,
};

pub fn config() -> Config {
    Config {
        bot_token: "1:test".to_string(),
        source: SourceChannel::parse("newschannel").unwrap(),
        destination: Destination {
            chat_id: ChatId(-1009999),
            thread_id: None,
        },
        admin_id: Some(UserId(777)),
        forward_edited_posts: false,
    }
}

pub fn channel_post(handle: &str, message_id: i32) -> Post {
    Post {
        chat: OriginChat {
            id: ChatId(-1001111),
            kind: ChatKind::Channel,
            handle: Some(handle.to_string()),
            title: Some("News Channel".to_string()),
        },
        message_id: MessageId(message_id),
        thread_id: None,
        sender: None,
        content: Content::Text("breaking".to_string()),
    }
}

pub fn group_message(kind: ChatKind, handle: Option<&str>, message_id: i32) -> Post {
    Post {
        chat: OriginChat {
            id: ChatId(-1002222),
            kind,
            handle: handle.map(str::to_string),
            title: Some("Discussion".to_string()),
        },
        message_id: MessageId(message_id),
        thread_id: None,
        sender: Some(UserId(5)),
        content: Content::Text("hello".to_string()),
    }
}

pub fn private_message(from: i64, text: &str) -> Post {
    Post {
        chat: OriginChat {
            id: ChatId(from),
            kind: ChatKind::Private,
            handle: None,
            title: None,
        },
        message_id: MessageId(1),
        thread_id: None,
        sender: Some(UserId(from)),
        content: Content::Text(text.to_string()),
    }
}

#[derive(Default)]
pub struct FakePort {
    next_id: Mutex<i32>,
    forwards: Mutex<Vec<ForwardRequest>>,
    forward_error: Mutex<Option<ForwardError>>,
    texts: Mutex<Vec<(ChatId, Option<ThreadId>, String)>>,
    fail_sends: Mutex<bool>,
    fail_get_me: Mutex<bool>,
    chats: Mutex<Vec<ChatSummary>>,
    lookups: Mutex<Vec<ChatLookup>>,
}

impl FakePort {
    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let mut guard = self.next_id.lock().unwrap();
        *guard += 1;
        MessageRef {
            chat_id,
            message_id: MessageId(*guard),
        }
    }

    pub fn fail_forwards_with(&self, err: ForwardError) {
        *self.forward_error.lock().unwrap() = Some(err);
    }

    pub fn fail_sends(&self) {
        *self.fail_sends.lock().unwrap() = true;
    }

    pub fn fail_get_me(&self) {
        *self.fail_get_me.lock().unwrap() = true;
    }

    pub fn add_chat(&self, chat: ChatSummary) {
        self.chats.lock().unwrap().push(chat);
    }

    pub fn forwards(&self) -> Vec<ForwardRequest> {
        self.forwards.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<(ChatId, Option<ThreadId>, String)> {
        self.texts.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<ChatLookup> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayPort for FakePort {
    async fn forward_message(
        &self,
        req: ForwardRequest,
    ) -> std::result::Result<MessageRef, ForwardError> {
        self.forwards.lock().unwrap().push(req);
        if let Some(err) = self.forward_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.alloc(req.to_chat))
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        thread_id: Option<ThreadId>,
        text: &str,
    ) -> Result<MessageRef> {
        self.texts
            .lock()
            .unwrap()
            .push((chat_id, thread_id, text.to_string()));
        if *self.fail_sends.lock().unwrap() {
            return Err(Error::External("telegram error: Forbidden".to_string()));
        }
        Ok(self.alloc(chat_id))
    }

    async fn get_chat(&self, chat: ChatLookup) -> Result<ChatSummary> {
        self.lookups.lock().unwrap().push(chat.clone());
        let chats = self.chats.lock().unwrap();
        let found = chats.iter().find(|c| match &chat {
            ChatLookup::Id(id) => c.id == *id,
            ChatLookup::Handle(h) => c
                .handle
                .as_deref()
                .is_some_and(|own| own.eq_ignore_ascii_case(h)),
        });
        found.cloned().ok_or_else(|| {
            Error::External("telegram error: Bad Request: chat not found".to_string())
        })
    }

    async fn get_me(&self) -> Result<BotIdentity> {
        if *self.fail_get_me.lock().unwrap() {
            return Err(Error::External("telegram error: Unauthorized".to_string()));
        }
        Ok(BotIdentity {
            id: UserId(1),
            username: "relay_bot".to_string(),
        })
    }
}
