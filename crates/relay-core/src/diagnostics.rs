use tracing::{info, warn};

use crate::{
    config::Config,
    messaging::{
        port::RelayPort,
        types::{BotIdentity, ChatLookup},
    },
    Result,
};

/// Startup checks, run once before polling starts.
///
/// Failing to reach the bot itself is fatal. Chat lookups only warn: the bot may
/// be added to the channel or the group after it starts.
pub async fn check_startup(cfg: &Config, port: &dyn RelayPort) -> Result<BotIdentity> {
    let me = port.get_me().await?;
    info!("bot @{} (ID: {}) started", me.username, me.id.0);

    let dest = cfg.destination;
    match port.get_chat(ChatLookup::Id(dest.chat_id)).await {
        Ok(chat) => info!(
            "destination group: {} (ID: {})",
            chat.display_title(),
            dest.chat_id.0
        ),
        Err(e) => warn!("cannot read destination group {}: {e}", dest.chat_id.0),
    }
    if let Some(thread) = dest.thread_id {
        info!("posts will land in topic {}", thread.0);
    }

    let source = ChatLookup::Handle(cfg.source.handle().to_string());
    match port.get_chat(source).await {
        Ok(chat) => info!("tracked channel: {} ({})", cfg.source, chat.display_title()),
        Err(e) => warn!("cannot read tracked channel {}: {e}", cfg.source),
    }

    if cfg.forward_edited_posts {
        info!("edited channel posts will be forwarded again");
    }

    Ok(me)
}
