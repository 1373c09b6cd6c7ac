//! Admin commands: `/start`, `/status`, `/info`, `/test`.
//!
//! These are read-only diagnostics; none of them changes how posts are relayed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    config::Config,
    domain::UserId,
    messaging::{
        port::RelayPort,
        types::{ChatLookup, ChatSummary},
    },
    security::is_authorized,
};

pub const DEFLECTION: &str = "This bot relays posts from a channel into a group.";

const TEST_MESSAGE: &str = "🧪 Test message from the relay bot.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Status,
    Info,
    Test,
}

impl Command {
    /// Recognize `/cmd`, `/cmd@botname` and `/cmd args`. Anything else is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?.split('@').next()?.to_lowercase();

        match name.as_str() {
            "start" => Some(Command::Start),
            "status" => Some(Command::Status),
            "info" => Some(Command::Info),
            "test" => Some(Command::Test),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Status => "status",
            Command::Info => "info",
            Command::Test => "test",
        }
    }
}

pub struct CommandResponder {
    cfg: Arc<Config>,
    port: Arc<dyn RelayPort>,
    started_at: DateTime<Utc>,
}

impl CommandResponder {
    pub fn new(cfg: Arc<Config>, port: Arc<dyn RelayPort>) -> Self {
        Self {
            cfg,
            port,
            started_at: Utc::now(),
        }
    }

    /// Build the reply text for `command` sent by `sender`.
    pub async fn respond(&self, command: Command, sender: Option<UserId>) -> String {
        if !is_authorized(sender, self.cfg.admin_id) {
            info!(
                "/{} from unauthorized user {:?}, sending deflection",
                command.name(),
                sender.map(|u| u.0)
            );
            return DEFLECTION.to_string();
        }

        match command {
            Command::Start => self.start_text(),
            Command::Status => self.status_text().await,
            Command::Info => self.info_text().await,
            Command::Test => self.test_text().await,
        }
    }

    fn start_text(&self) -> String {
        format!(
            "🤖 Relay bot is running!\n\n\
             📺 Tracked channel: {}\n\
             🎯 Destination group: {}\n\
             🧵 Topic: {}\n\n\
             Add me to the channel as an administrator with the right to read posts, \
             and to the group with the right to send messages.\n\n\
             Every new post from the channel will be forwarded to the group automatically.",
            self.cfg.source,
            self.cfg.destination.chat_id.0,
            self.topic_label(),
        )
    }

    async fn status_text(&self) -> String {
        let lookup = ChatLookup::Id(self.cfg.destination.chat_id);
        match self.port.get_chat(lookup).await {
            Ok(chat) => format!(
                "✅ Relay status:\n\
                 📺 Tracked channel: {}\n\
                 🎯 Destination group: {}\n\
                 🆔 Group ID: {}\n\
                 🧵 Topic: {}\n\
                 ✏️ Forward edits: {}\n\
                 ⏱ Uptime: {}\n\
                 📊 Relay is running normally",
                self.cfg.source,
                chat.display_title(),
                self.cfg.destination.chat_id.0,
                self.topic_label(),
                if self.cfg.forward_edited_posts {
                    "on"
                } else {
                    "off"
                },
                format_duration((Utc::now() - self.started_at).num_seconds()),
            ),
            Err(e) => format!("❌ Cannot access the destination group: {e}"),
        }
    }

    async fn info_text(&self) -> String {
        let source = ChatLookup::Handle(self.cfg.source.handle().to_string());
        let destination = ChatLookup::Id(self.cfg.destination.chat_id);

        let source_block = self.describe(source).await;
        let destination_block = self.describe(destination).await;

        format!(
            "ℹ️ Chat info\n\n📺 Source channel\n{source_block}\n\n🎯 Destination group\n{destination_block}"
        )
    }

    async fn describe(&self, lookup: ChatLookup) -> String {
        let label = lookup.to_string();
        match self.port.get_chat(lookup).await {
            Ok(chat) => format_chat(&chat),
            Err(e) => format!("❌ Lookup failed for {label}: {e}"),
        }
    }

    async fn test_text(&self) -> String {
        let dest = self.cfg.destination;
        match self
            .port
            .send_text(dest.chat_id, dest.thread_id, TEST_MESSAGE)
            .await
        {
            Ok(sent) => format!(
                "✅ Test message delivered to {} (topic: {}, message id {})",
                dest.chat_id.0,
                self.topic_label(),
                sent.message_id.0
            ),
            Err(e) => format!("❌ Test message failed: {e}"),
        }
    }

    fn topic_label(&self) -> String {
        match self.cfg.destination.thread_id {
            Some(t) => t.0.to_string(),
            None => "general".to_string(),
        }
    }
}

fn format_chat(chat: &ChatSummary) -> String {
    let handle = chat
        .handle
        .as_deref()
        .map(|h| format!("@{h}"))
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Title: {}\nType: {}\nID: {}\nHandle: {}\nForum topics: {}",
        chat.display_title(),
        chat.kind,
        chat.id.0,
        handle,
        if chat.is_forum { "yes" } else { "no" },
    )
}

fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        return format!("{hours}h {mins}m {secs}s");
    }
    if mins > 0 {
        return format!("{mins}m {secs}s");
    }
    format!("{secs}s")
}
