//! teloxide types → `relay-core` model.

use teloxide::types::{
    Chat, ChatKind as TgChatKind, ChatPublic, Message, PublicChatKind, PublicChatSupergroup,
    Update as TgUpdate, UpdateKind,
};

use relay_core::{
    domain::{ChatId, MessageId, ThreadId, UserId},
    messaging::types::ChatSummary,
    update::{ChatKind, Content, OriginChat, Post, Update},
};

pub fn update(upd: &TgUpdate) -> Update {
    match &upd.kind {
        UpdateKind::ChannelPost(m) => Update::ChannelPost(post(m)),
        UpdateKind::EditedChannelPost(m) => Update::EditedChannelPost(post(m)),
        UpdateKind::Message(m) => Update::Message(post(m)),
        UpdateKind::EditedMessage(m) => Update::EditedMessage(post(m)),
        UpdateKind::CallbackQuery(_) => Update::Other("callback_query"),
        UpdateKind::InlineQuery(_) => Update::Other("inline_query"),
        UpdateKind::MyChatMember(_) => Update::Other("my_chat_member"),
        _ => Update::Other("other"),
    }
}

pub fn post(m: &Message) -> Post {
    Post {
        chat: origin_chat(&m.chat),
        message_id: MessageId(m.id.0),
        thread_id: m.thread_id.map(ThreadId),
        sender: m.from().map(|u| UserId(u.id.0 as i64)),
        content: content(m),
    }
}

fn content(m: &Message) -> Content {
    if let Some(text) = m.text() {
        return Content::Text(text.to_string());
    }
    if m.document().is_some() {
        return Content::Document;
    }
    Content::Other
}

fn origin_chat(chat: &Chat) -> OriginChat {
    OriginChat {
        id: ChatId(chat.id.0),
        kind: chat_kind(chat),
        handle: chat.username().map(str::to_string),
        title: chat.title().map(str::to_string),
    }
}

fn chat_kind(chat: &Chat) -> ChatKind {
    if chat.is_channel() {
        ChatKind::Channel
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_group() {
        ChatKind::Group
    } else {
        ChatKind::Private
    }
}

pub fn chat_summary(chat: &Chat) -> ChatSummary {
    let is_forum = matches!(
        &chat.kind,
        TgChatKind::Public(ChatPublic {
            kind: PublicChatKind::Supergroup(PublicChatSupergroup { is_forum: true, .. }),
            ..
        })
    );

    ChatSummary {
        id: ChatId(chat.id.0),
        kind: chat_kind(chat),
        title: chat.title().map(str::to_string),
        handle: chat.username().map(str::to_string),
        is_forum,
    }
}
