use std::{env, fmt, fs, path::Path};

use tracing::warn;

use crate::{
    domain::{ChatId, ThreadId, UserId},
    errors::Error,
    Result,
};

/// The one broadcast channel whose posts are relayed.
///
/// Stored without the leading `@`; comparisons are case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceChannel {
    handle: String,
}

impl SourceChannel {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
        if handle.is_empty() {
            return Err(Error::Config(
                "SOURCE_CHANNEL_USERNAME must not be empty".to_string(),
            ));
        }
        Ok(Self {
            handle: handle.to_string(),
        })
    }

    /// Handle as configured, without `@`.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn is(&self, other: &str) -> bool {
        self.handle.to_lowercase() == other.to_lowercase()
    }
}

impl fmt::Display for SourceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.handle)
    }
}

/// Where relayed posts land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    pub chat_id: ChatId,
    pub thread_id: Option<ThreadId>,
}

/// Typed configuration, loaded once at startup from the environment.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub source: SourceChannel,
    pub destination: Destination,
    pub admin_id: Option<UserId>,
    /// Relay edits of channel posts as new forwards. Off by default.
    pub forward_edited_posts: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("admin_id", &self.admin_id)
            .field("forward_edited_posts", &self.forward_edited_posts)
            .finish()
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let bot_token = get("BOT_TOKEN").ok_or_else(|| missing("BOT_TOKEN"))?;

        let target = get("TARGET_GROUP_ID").ok_or_else(|| missing("TARGET_GROUP_ID"))?;
        let chat_id = ChatId(parse_number::<i64>("TARGET_GROUP_ID", &target)?);

        let source = get("SOURCE_CHANNEL_USERNAME")
            .ok_or_else(|| missing("SOURCE_CHANNEL_USERNAME"))?;
        let source = SourceChannel::parse(&source)?;

        let thread_id = get("MESSAGE_THREAD_ID")
            .map(|v| parse_number::<i32>("MESSAGE_THREAD_ID", &v))
            .transpose()?
            .map(ThreadId);

        let admin_id = get("ADMIN_ID")
            .map(|v| parse_number::<i64>("ADMIN_ID", &v))
            .transpose()?
            .map(UserId);

        let forward_edited_posts = get("FORWARD_EDITED_POSTS")
            .map(|v| parse_bool("FORWARD_EDITED_POSTS", &v))
            .unwrap_or(false);

        Ok(Self {
            bot_token,
            source,
            destination: Destination { chat_id, thread_id },
            admin_id,
            forward_edited_posts,
        })
    }
}

fn missing(key: &str) -> Error {
    Error::Config(format!("{key} environment variable is required"))
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::Config(format!("{key} must be a number, got {raw:?}")))
}

fn parse_bool(key: &str, raw: &str) -> bool {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("{key}={raw:?} is not a boolean, treating it as off");
            false
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}
