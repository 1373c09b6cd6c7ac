use std::sync::Arc;

use crate::{
    config::Destination,
    domain::MessageRef,
    messaging::{port::RelayPort, types::ForwardRequest},
    update::Post,
};

/// Why a relay call failed. None of these are retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ForwardError {
    #[error("destination chat not found")]
    DestinationNotFound,

    #[error("not enough rights to post in the destination chat")]
    InsufficientRights,

    #[error("source message no longer exists")]
    SourceMessageGone,

    #[error("access forbidden")]
    AccessForbidden,

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ForwardError {
    /// Classify a Bot API error description (e.g. `Bad Request: chat not found`).
    pub fn from_description(description: &str) -> Self {
        let d = description.to_lowercase();
        if d.contains("chat not found") || d.contains("chat_id_invalid") {
            ForwardError::DestinationNotFound
        } else if d.contains("message to forward not found") || d.contains("message_id_invalid") {
            ForwardError::SourceMessageGone
        } else if d.contains("not enough rights")
            || d.contains("need administrator rights")
            || d.contains("chat_write_forbidden")
        {
            ForwardError::InsufficientRights
        } else if d.contains("forbidden") {
            ForwardError::AccessForbidden
        } else {
            ForwardError::Unknown(description.to_string())
        }
    }

    /// What the operator should check.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ForwardError::DestinationNotFound => {
                Some("destination group not found, check TARGET_GROUP_ID")
            }
            ForwardError::InsufficientRights => {
                Some("bot lacks rights to post or forward into the destination group")
            }
            ForwardError::SourceMessageGone => {
                Some("the post was deleted before it could be forwarded")
            }
            ForwardError::AccessForbidden => {
                Some("bot must be a member (admin) of both the channel and the group")
            }
            ForwardError::Unknown(_) => None,
        }
    }
}

pub type ForwardResult = std::result::Result<MessageRef, ForwardError>;

/// Issues relay calls for matched posts.
#[derive(Clone)]
pub struct Forwarder {
    port: Arc<dyn RelayPort>,
}

impl Forwarder {
    pub fn new(port: Arc<dyn RelayPort>) -> Self {
        Self { port }
    }

    pub fn request(post: &Post, destination: &Destination) -> ForwardRequest {
        ForwardRequest {
            to_chat: destination.chat_id,
            to_thread: destination.thread_id,
            from_chat: post.chat.id,
            message_id: post.message_id,
        }
    }

    pub async fn forward(&self, post: &Post, destination: &Destination) -> ForwardResult {
        self.port
            .forward_message(Self::request(post, destination))
            .await
    }
}
