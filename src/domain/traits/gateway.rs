use async_trait::async_trait;
use crate::domain::entities::{HistoryEntry, User};
use crate::application::errors::BotError;

/// Upper bound on a single history request imposed by the chat platform
pub const MAX_HISTORY_PAGE: usize = 100;

/// Chat gateway - abstraction over the messaging platform connection
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send a message to a channel, returning the new message id
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Replace the text of a message previously sent by the bot
    async fn edit_message(&self, channel_id: &str, message_id: &str, text: &str) -> Result<(), BotError>;

    /// Fetch up to `limit` messages older than `before`, most recent first
    async fn fetch_history(
        &self,
        channel_id: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<HistoryEntry>, BotError>;

    /// The bot's own identity
    fn bot_info(&self) -> BotInfo;

    /// How a channel is referenced inside message text
    fn channel_label(&self, channel_id: &str) -> String {
        format!("<#{}>", channel_id)
    }
}

/// Bot information, known once the gateway reports ready
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}

impl BotInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn as_user(&self) -> User {
        User::new(self.id.clone(), self.name.clone()).bot()
    }
}
