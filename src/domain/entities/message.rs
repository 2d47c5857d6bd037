use super::User;

/// A message event delivered by the chat gateway.
///
/// Created once per event and consumed by the router.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub author: User,
    pub text: String,
    pub channel_id: String,
    pub mentions: Vec<User>,
}

impl IncomingMessage {
    pub fn new(author: User, channel_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            channel_id: channel_id.into(),
            mentions: Vec::new(),
        }
    }

    pub fn with_mention(mut self, user: User) -> Self {
        self.mentions.push(user);
        self
    }

    pub fn with_mentions(mut self, users: Vec<User>) -> Self {
        self.mentions = users;
        self
    }

    pub fn mentions_user(&self, user_id: &str) -> bool {
        self.mentions.iter().any(|u| u.id == user_id)
    }

    /// Message text with every mention token removed and whitespace trimmed
    pub fn text_without_mentions(&self) -> String {
        let mut text = self.text.clone();
        for user in &self.mentions {
            for token in user.mention_tokens() {
                text = text.replace(&token, "");
            }
        }
        text.trim().to_string()
    }
}

/// One entry of channel history, most recent first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub author_name: String,
}

impl HistoryEntry {
    pub fn new(id: impl Into<String>, author_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author_name: author_name.into(),
        }
    }
}

/// What the router wants delivered for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Send a placeholder, then edit it with the measured round-trip time
    Latency,
}
