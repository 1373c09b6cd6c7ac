use tracing::{debug, warn};

use crate::{config::SourceChannel, update::Post};

/// Does this post come from the tracked source channel?
///
/// A chat without a public handle cannot be verified and never matches.
pub fn matches(post: &Post, source: &SourceChannel) -> bool {
    let Some(handle) = post.chat.handle.as_deref() else {
        warn!(
            chat_id = post.chat.id.0,
            "post from chat without a handle, cannot verify origin (expected {source})"
        );
        return false;
    };

    if source.is(handle) {
        return true;
    }

    debug!("post from @{handle} ignored (expected {source})");
    false
}
