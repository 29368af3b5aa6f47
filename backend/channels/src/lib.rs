use async_trait::async_trait;

pub mod discord;

pub use discord::DiscordAdapter;

/// A chat-platform session that registers commands and feeds invocations
/// to the dispatcher.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Open the session and run until it ends. Returns an error if the
    /// session cannot start or command registration fails.
    async fn start(&self) -> anyhow::Result<()>;
}
