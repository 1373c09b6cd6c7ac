//! Platform-neutral model of inbound updates.
//!
//! The adapter decides which wire shape an update had; the classifier is the
//! only place that interprets that shape.

use std::fmt;

use crate::domain::{ChatId, MessageId, ThreadId, UserId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update {
    ChannelPost(Post),
    EditedChannelPost(Post),
    Message(Post),
    EditedMessage(Post),
    /// Any update kind the relay does not model (callbacks, polls, ...).
    Other(&'static str),
}

impl Update {
    pub fn post(&self) -> Option<&Post> {
        match self {
            Update::ChannelPost(p)
            | Update::EditedChannelPost(p)
            | Update::Message(p)
            | Update::EditedMessage(p) => Some(p),
            Update::Other(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Update::ChannelPost(_) => "channel_post",
            Update::EditedChannelPost(_) => "edited_channel_post",
            Update::Message(_) => "message",
            Update::EditedMessage(_) => "edited_message",
            Update::Other(name) => *name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub chat: OriginChat,
    pub message_id: MessageId,
    pub thread_id: Option<ThreadId>,
    pub sender: Option<UserId>,
    pub content: Content,
}

impl Post {
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginChat {
    pub id: ChatId,
    pub kind: ChatKind,
    pub handle: Option<String>,
    pub title: Option<String>,
}

impl OriginChat {
    /// `@handle` if present, else the title, else the numeric id.
    pub fn label(&self) -> String {
        match (&self.handle, &self.title) {
            (Some(h), _) => format!("@{h}"),
            (None, Some(t)) => t.clone(),
            (None, None) => self.id.0.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChatKind::Private => "private",
            ChatKind::Group => "group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Document,
    Other,
}

impl Content {
    pub fn describe(&self) -> &'static str {
        match self {
            Content::Text(_) => "text",
            Content::Document => "document",
            Content::Other => "other",
        }
    }
}
