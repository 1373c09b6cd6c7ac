//! Update classification.
//!
//! Telegram may deliver a source post as `channel_post`, `edited_channel_post`
//! or a plain `message` depending on the bot's privileges. The rules below are
//! evaluated in order and the first one that fires wins, so an update can never
//! be handled twice.

use crate::{
    commands::Command,
    update::{ChatKind, Update},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    EditedChannelPost,
    ChannelPost,
    GroupMessage,
    ChannelMessage,
    Command(Command),
    Unrelated,
}

impl Category {
    /// Whether the update may be relayed once its origin matches.
    pub fn is_eligible(self) -> bool {
        matches!(
            self,
            Category::ChannelPost | Category::GroupMessage | Category::ChannelMessage
        )
    }
}

/// One entry of the dispatch table.
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Update) -> Option<Category>,
}

/// Dispatch table in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "edited_channel_post",
        apply: edited_channel_post,
    },
    Rule {
        name: "channel_post",
        apply: channel_post,
    },
    Rule {
        name: "group_message",
        apply: group_message,
    },
    Rule {
        name: "channel_message",
        apply: channel_message,
    },
    Rule {
        name: "private_command",
        apply: private_command,
    },
];

pub fn classify(update: &Update) -> Category {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(update))
        .unwrap_or(Category::Unrelated)
}

fn edited_channel_post(update: &Update) -> Option<Category> {
    matches!(update, Update::EditedChannelPost(_)).then_some(Category::EditedChannelPost)
}

fn channel_post(update: &Update) -> Option<Category> {
    matches!(update, Update::ChannelPost(_)).then_some(Category::ChannelPost)
}

fn group_message(update: &Update) -> Option<Category> {
    match update {
        Update::Message(p) if matches!(p.chat.kind, ChatKind::Group | ChatKind::Supergroup) => {
            Some(Category::GroupMessage)
        }
        _ => None,
    }
}

fn channel_message(update: &Update) -> Option<Category> {
    match update {
        Update::Message(p) if p.chat.kind == ChatKind::Channel => Some(Category::ChannelMessage),
        _ => None,
    }
}

fn private_command(update: &Update) -> Option<Category> {
    let Update::Message(p) = update else {
        return None;
    };
    p.text().and_then(Command::parse).map(Category::Command)
}
