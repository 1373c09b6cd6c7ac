use std::fmt;

use crate::{
    domain::{ChatId, MessageId, ThreadId, UserId},
    update::ChatKind,
};

/// A single relay call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForwardRequest {
    pub to_chat: ChatId,
    /// Set only when a destination topic is configured.
    pub to_thread: Option<ThreadId>,
    pub from_chat: ChatId,
    pub message_id: MessageId,
}

/// How to address a chat for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatLookup {
    Id(ChatId),
    /// Public handle without `@`.
    Handle(String),
}

impl fmt::Display for ChatLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatLookup::Id(id) => write!(f, "{}", id.0),
            ChatLookup::Handle(h) => write!(f, "@{h}"),
        }
    }
}

/// What `getChat` tells us about a chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSummary {
    pub id: ChatId,
    pub kind: ChatKind,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub is_forum: bool,
}

impl ChatSummary {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(no title)")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: UserId,
    pub username: String,
}
