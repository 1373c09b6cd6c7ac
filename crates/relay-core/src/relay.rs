//! The per-update pipeline: classify → match → forward (or answer a command).
//!
//! `Relay::handle` never fails. Every failure is logged and reported in the
//! returned [`Outcome`] so the polling loop can move on to the next update.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::{
    classify::{classify, Category},
    commands::{Command, CommandResponder},
    config::Config,
    domain::MessageRef,
    forward::{ForwardError, Forwarder},
    matcher::matches,
    messaging::port::RelayPort,
    update::{Post, Update},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Forwarded(MessageRef),
    ForwardFailed(ForwardError),
    Replied(Command),
    Skipped(Skip),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skip {
    EditedPost,
    ForeignOrigin,
    Unrelated,
}

pub struct Relay {
    cfg: Arc<Config>,
    port: Arc<dyn RelayPort>,
    forwarder: Forwarder,
    responder: CommandResponder,
}

impl Relay {
    pub fn new(cfg: Arc<Config>, port: Arc<dyn RelayPort>) -> Self {
        Self {
            forwarder: Forwarder::new(port.clone()),
            responder: CommandResponder::new(cfg.clone(), port.clone()),
            cfg,
            port,
        }
    }

    pub async fn handle(&self, update: &Update) -> Outcome {
        let category = classify(update);
        let Some(post) = update.post() else {
            debug!("ignoring {} update", update.kind_name());
            return Outcome::Skipped(Skip::Unrelated);
        };

        match category {
            Category::EditedChannelPost if !self.cfg.forward_edited_posts => {
                info!(
                    "edited post {} in {} not relayed (edits are off)",
                    post.message_id.0,
                    post.chat.label()
                );
                Outcome::Skipped(Skip::EditedPost)
            }
            Category::EditedChannelPost => self.relay(post).await,
            c if c.is_eligible() => self.relay(post).await,
            Category::Command(command) => self.answer(command, post).await,
            _ => {
                debug!(
                    "dropping {} from {} ({} chat)",
                    update.kind_name(),
                    post.chat.label(),
                    post.chat.kind
                );
                Outcome::Skipped(Skip::Unrelated)
            }
        }
    }

    async fn relay(&self, post: &Post) -> Outcome {
        if !matches(post, &self.cfg.source) {
            return Outcome::Skipped(Skip::ForeignOrigin);
        }

        let dest = self.cfg.destination;
        info!(
            "post {} from {} ({}), forwarding to {}",
            post.message_id.0,
            post.chat.label(),
            post.content.describe(),
            dest.chat_id.0
        );

        match self.forwarder.forward(post, &dest).await {
            Ok(sent) => {
                info!(
                    "forwarded post {} to {} as message {}",
                    post.message_id.0, dest.chat_id.0, sent.message_id.0
                );
                Outcome::Forwarded(sent)
            }
            Err(e) => {
                error!(
                    from_chat = post.chat.id.0,
                    to_chat = dest.chat_id.0,
                    to_thread = dest.thread_id.map(|t| t.0),
                    message_id = post.message_id.0,
                    "failed to forward post: {e}"
                );
                if let Some(hint) = e.hint() {
                    error!("{hint}");
                }
                Outcome::ForwardFailed(e)
            }
        }
    }

    async fn answer(&self, command: Command, post: &Post) -> Outcome {
        let reply = self.responder.respond(command, post.sender).await;
        if let Err(e) = self
            .port
            .send_text(post.chat.id, post.thread_id, &reply)
            .await
        {
            warn!("failed to answer /{} in {}: {e}", command.name(), post.chat.id.0);
        }
        Outcome::Replied(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::DEFLECTION;
    use crate::domain::{ChatId, ThreadId};
    use crate::test_support::{channel_post, config, group_message, private_message, FakePort};
    use crate::update::{ChatKind, Content};

    fn relay_with(port: Arc<FakePort>, cfg: Config) -> Relay {
        Relay::new(Arc::new(cfg), port)
    }

    #[tokio::test]
    async fn forwards_matching_channel_post_case_insensitively() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        let out = relay
            .handle(&Update::ChannelPost(channel_post("NewsChannel", 42)))
            .await;

        assert!(matches!(out, Outcome::Forwarded(_)));
        let calls = port.forwards();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to_chat, ChatId(-1009999));
        assert_eq!(calls[0].from_chat, ChatId(-1001111));
        assert_eq!(calls[0].message_id.0, 42);
        assert_eq!(calls[0].to_thread, None);
    }

    #[tokio::test]
    async fn foreign_channel_is_not_forwarded() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        let out = relay
            .handle(&Update::ChannelPost(channel_post("otherchannel", 1)))
            .await;

        assert_eq!(out, Outcome::Skipped(Skip::ForeignOrigin));
        assert!(port.forwards().is_empty());
    }

    #[tokio::test]
    async fn handleless_channel_is_not_forwarded() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());
        let mut post = channel_post("newschannel", 1);
        post.chat.handle = None;

        let out = relay.handle(&Update::ChannelPost(post)).await;
        assert_eq!(out, Outcome::Skipped(Skip::ForeignOrigin));
        assert!(port.forwards().is_empty());
    }

    #[tokio::test]
    async fn edited_posts_are_dropped_by_default() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        let out = relay
            .handle(&Update::EditedChannelPost(channel_post("newschannel", 3)))
            .await;

        assert_eq!(out, Outcome::Skipped(Skip::EditedPost));
        assert!(port.forwards().is_empty());
    }

    #[tokio::test]
    async fn edited_posts_are_relayed_when_enabled() {
        let port = Arc::new(FakePort::default());
        let mut cfg = config();
        cfg.forward_edited_posts = true;
        let relay = relay_with(port.clone(), cfg);

        let out = relay
            .handle(&Update::EditedChannelPost(channel_post("newschannel", 3)))
            .await;
        assert!(matches!(out, Outcome::Forwarded(_)));

        let out = relay
            .handle(&Update::EditedChannelPost(channel_post("otherchannel", 4)))
            .await;
        assert_eq!(out, Outcome::Skipped(Skip::ForeignOrigin));
        assert_eq!(port.forwards().len(), 1);
    }

    #[tokio::test]
    async fn channel_post_delivered_as_message_is_forwarded() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        let out = relay
            .handle(&Update::Message(channel_post("newschannel", 8)))
            .await;
        assert!(matches!(out, Outcome::Forwarded(_)));
    }

    #[tokio::test]
    async fn group_messages_from_the_source_handle_are_forwarded() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        for (kind, id) in [(ChatKind::Group, 11), (ChatKind::Supergroup, 12)] {
            let out = relay
                .handle(&Update::Message(group_message(kind, Some("NewsChannel"), id)))
                .await;
            assert!(matches!(out, Outcome::Forwarded(_)), "{kind}: {out:?}");
        }

        let calls = port.forwards();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].from_chat, ChatId(-1002222));
        assert_eq!(calls[1].message_id.0, 12);
        assert_eq!(calls[1].to_chat, ChatId(-1009999));
    }

    #[tokio::test]
    async fn group_messages_from_other_chats_are_not_forwarded() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        let foreign = group_message(ChatKind::Supergroup, Some("readers"), 1);
        let handleless = group_message(ChatKind::Group, None, 2);
        for post in [foreign, handleless] {
            let out = relay.handle(&Update::Message(post)).await;
            assert_eq!(out, Outcome::Skipped(Skip::ForeignOrigin));
        }
        assert!(port.forwards().is_empty());
    }

    #[tokio::test]
    async fn configured_topic_is_used() {
        let port = Arc::new(FakePort::default());
        let mut cfg = config();
        cfg.destination.thread_id = Some(ThreadId(77));
        let relay = relay_with(port.clone(), cfg);

        relay
            .handle(&Update::ChannelPost(channel_post("newschannel", 5)))
            .await;
        assert_eq!(port.forwards()[0].to_thread, Some(ThreadId(77)));
    }

    #[tokio::test]
    async fn forward_failure_is_reported_and_next_update_proceeds() {
        let port = Arc::new(FakePort::default());
        port.fail_forwards_with(ForwardError::DestinationNotFound);
        let relay = relay_with(port.clone(), config());

        let first = relay
            .handle(&Update::ChannelPost(channel_post("newschannel", 1)))
            .await;
        assert_eq!(first, Outcome::ForwardFailed(ForwardError::DestinationNotFound));

        let second = relay
            .handle(&Update::ChannelPost(channel_post("newschannel", 2)))
            .await;
        assert_eq!(second, Outcome::ForwardFailed(ForwardError::DestinationNotFound));
        assert_eq!(port.forwards().len(), 2);
    }

    #[tokio::test]
    async fn admin_command_is_answered_in_the_same_chat() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        let out = relay
            .handle(&Update::Message(private_message(777, "/start")))
            .await;

        assert_eq!(out, Outcome::Replied(Command::Start));
        let texts = port.texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, ChatId(777));
        assert!(texts[0].2.contains("@newschannel"));
        assert!(port.forwards().is_empty());
    }

    #[tokio::test]
    async fn non_admin_start_gets_deflection() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        relay
            .handle(&Update::Message(private_message(5, "/start")))
            .await;

        let texts = port.texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].2, DEFLECTION);
    }

    #[tokio::test]
    async fn private_chatter_is_ignored() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        let out = relay
            .handle(&Update::Message(private_message(777, "hello")))
            .await;
        assert_eq!(out, Outcome::Skipped(Skip::Unrelated));
        assert!(port.texts().is_empty());
        assert!(port.forwards().is_empty());
    }

    #[tokio::test]
    async fn reply_failure_does_not_fail_the_update() {
        let port = Arc::new(FakePort::default());
        port.fail_sends();
        let relay = relay_with(port.clone(), config());

        let out = relay
            .handle(&Update::Message(private_message(777, "/start")))
            .await;
        assert_eq!(out, Outcome::Replied(Command::Start));
    }

    #[tokio::test]
    async fn other_updates_and_edited_messages_are_skipped() {
        let port = Arc::new(FakePort::default());
        let relay = relay_with(port.clone(), config());

        assert_eq!(
            relay.handle(&Update::Other("callback_query")).await,
            Outcome::Skipped(Skip::Unrelated)
        );

        let mut edited = channel_post("newschannel", 1);
        edited.chat.kind = ChatKind::Supergroup;
        edited.content = Content::Other;
        assert_eq!(
            relay.handle(&Update::EditedMessage(edited)).await,
            Outcome::Skipped(Skip::Unrelated)
        );
        assert!(port.forwards().is_empty());
    }
}
