//! Message parser - Classifies raw events into routing intents

use crate::domain::entities::{Command, IncomingMessage};
use crate::domain::traits::BotInfo;

/// How one incoming message should be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Own message or nothing to do
    Ignore,
    Command(Command),
    /// Bot was addressed; carries the text with mentions stripped
    Mention(String),
    /// Plain chatter, only keyword triggers apply
    Passive(String),
}

/// Parses incoming messages into routing intents
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    pub fn classify(&self, message: &IncomingMessage, bot: &BotInfo) -> Intent {
        if message.author.id == bot.id {
            return Intent::Ignore;
        }

        if let Some(command) = self.parse_command(&message.text) {
            return Intent::Command(command);
        }

        if message.mentions_user(&bot.id) {
            return Intent::Mention(message.text_without_mentions());
        }

        if message.mentions.is_empty() {
            Intent::Passive(message.text.clone())
        } else {
            Intent::Ignore
        }
    }

    /// Parse a command message, `None` when the prefix is absent
    pub fn parse_command(&self, text: &str) -> Option<Command> {
        let text = text.trim();
        if self.command_prefix.is_empty() || !text.starts_with(&self.command_prefix) {
            return None;
        }

        let cmd_text = &text[self.command_prefix.len()..];

        // "/ ping" has an empty name and resolves to nothing
        if cmd_text.starts_with(char::is_whitespace) {
            return Some(Command::new("", Vec::new()));
        }

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or("");
        let args = parts.map(|s| s.to_string()).collect();

        Some(Command::new(name, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;

    fn bot() -> BotInfo {
        BotInfo::new("99", "kizuna")
    }

    fn from(author: &str, text: &str) -> IncomingMessage {
        IncomingMessage::new(User::new(author, author), "c1", text)
    }

    #[test]
    fn test_own_messages_are_ignored() {
        let parser = MessageParser::new("/");
        assert_eq!(parser.classify(&from("99", "/ping"), &bot()), Intent::Ignore);
    }

    #[test]
    fn test_command_is_split_and_lowercased() {
        let parser = MessageParser::new("/");
        let intent = parser.classify(&from("1", "  /GURUME 新宿 焼肉 個室 "), &bot());
        assert_eq!(
            intent,
            Intent::Command(Command::new(
                "gurume",
                vec!["新宿".to_string(), "焼肉".to_string(), "個室".to_string()]
            ))
        );
    }

    #[test]
    fn test_mention_strips_tokens() {
        let parser = MessageParser::new("/");
        let msg = from("1", "<@!99> 元気？").with_mention(bot().as_user());
        assert_eq!(parser.classify(&msg, &bot()), Intent::Mention("元気？".to_string()));
    }

    #[test]
    fn test_passive_only_without_mentions() {
        let parser = MessageParser::new("/");
        assert_eq!(
            parser.classify(&from("1", "今日の天気は？"), &bot()),
            Intent::Passive("今日の天気は？".to_string())
        );

        let other = from("1", "<@5> 天気は？").with_mention(User::new("5", "bob"));
        assert_eq!(parser.classify(&other, &bot()), Intent::Ignore);
    }

    #[test]
    fn test_prefix_without_name() {
        let parser = MessageParser::new("/");
        assert_eq!(parser.parse_command("/ ping"), Some(Command::new("", Vec::new())));
        assert_eq!(parser.parse_command("hello"), None);
    }
}
