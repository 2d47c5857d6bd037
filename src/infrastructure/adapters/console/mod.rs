//! Console adapter for local development
//!
//! Reads lines from stdin as messages from a single local user and prints
//! replies. Channel history lives in memory so `/rank` works offline.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::Router;
use crate::domain::entities::{HistoryEntry, IncomingMessage, User};
use crate::domain::traits::{BotInfo, ChatGateway};

pub const CONSOLE_CHANNEL: &str = "console";

struct Posted {
    id: u64,
    author: String,
    text: String,
}

/// In-memory chat gateway printing to stdout
pub struct ConsoleAdapter {
    info: BotInfo,
    user: User,
    log: Mutex<Vec<Posted>>,
}

impl ConsoleAdapter {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            info: BotInfo::new("console-bot", bot_name),
            user: User::new("console-user", "you"),
            log: Mutex::new(Vec::new()),
        }
    }

    fn post(&self, author: &str, text: &str) -> Result<String, BotError> {
        let mut log = self
            .log
            .lock()
            .map_err(|e| BotError::Internal(e.to_string()))?;
        let id = log.len() as u64 + 1;
        log.push(Posted {
            id,
            author: author.to_string(),
            text: text.to_string(),
        });
        Ok(id.to_string())
    }

    /// Record a line typed by the local user and build its event
    pub fn receive(&self, line: &str) -> Result<IncomingMessage, BotError> {
        self.post(&self.user.name, line)?;

        let bot = self.info.as_user();
        let mentioned = bot.mention_tokens().iter().any(|t| line.contains(t.as_str()));
        let message = IncomingMessage::new(self.user.clone(), CONSOLE_CHANNEL, line);

        Ok(if mentioned { message.with_mention(bot) } else { message })
    }

    /// Text of a previously posted message
    pub fn text_of(&self, message_id: &str) -> Option<String> {
        let id = message_id.parse::<u64>().ok()?;
        let log = self.log.lock().ok()?;
        log.iter().find(|p| p.id == id).map(|p| p.text.clone())
    }

    /// Read stdin until EOF, routing each line
    pub async fn run(&self, router: &Router) -> Result<(), BotError> {
        tracing::info!("Starting console session (mention with <@{}>)", self.info.id);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| BotError::Internal(e.to_string()))?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message = self.receive(line)?;
            if let Err(e) = router.dispatch(self, &message).await {
                tracing::error!("Failed to handle console input: {}", e);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl ChatGateway for ConsoleAdapter {
    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
        println!("[{}] {}", self.info.name, text);
        self.post(&self.info.name, text)
    }

    async fn edit_message(&self, _channel_id: &str, message_id: &str, text: &str) -> Result<(), BotError> {
        let id = message_id
            .parse::<u64>()
            .map_err(|e| BotError::Parse(e.to_string()))?;

        let mut log = self
            .log
            .lock()
            .map_err(|e| BotError::Internal(e.to_string()))?;
        let posted = log
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BotError::Internal(format!("No message {}", id)))?;
        posted.text = text.to_string();

        println!("[{}] (edited) {}", self.info.name, text);
        Ok(())
    }

    async fn fetch_history(
        &self,
        _channel_id: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<HistoryEntry>, BotError> {
        let cursor = match before {
            Some(id) => Some(id.parse::<u64>().map_err(|e| BotError::Parse(e.to_string()))?),
            None => None,
        };

        let log = self
            .log
            .lock()
            .map_err(|e| BotError::Internal(e.to_string()))?;
        Ok(log
            .iter()
            .rev()
            .filter(|p| cursor.map_or(true, |c| p.id < c))
            .take(limit)
            .map(|p| HistoryEntry::new(p.id.to_string(), p.author.clone()))
            .collect())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }

    fn channel_label(&self, channel_id: &str) -> String {
        format!("#{}", channel_id)
    }
}
