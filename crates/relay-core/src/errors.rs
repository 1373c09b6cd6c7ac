/// Core error type for the relay.
///
/// Adapter crates map their specific errors into this type so the engine can
/// report failures consistently. Forward failures have their own taxonomy in
/// [`crate::forward::ForwardError`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
