//! Discord adapter
//!
//! Bridges serenity's gateway events into the router and exposes the REST
//! client as a `ChatGateway`.

use async_trait::async_trait;
use serenity::all::{
    ChannelId, Client, Context, EditMessage, EventHandler, GatewayIntents, GetMessages, Http,
    Message, MessageId, Ready,
};
use std::sync::{Arc, OnceLock};

use crate::application::errors::BotError;
use crate::application::messaging::Router;
use crate::domain::entities::{HistoryEntry, IncomingMessage, User};
use crate::domain::traits::{BotInfo, ChatGateway, MAX_HISTORY_PAGE};

/// Parse a Discord snowflake; zero is not a valid id
fn snowflake(id: &str) -> Result<u64, BotError> {
    id.parse::<u64>()
        .ok()
        .filter(|n| *n != 0)
        .ok_or_else(|| BotError::Parse(format!("Invalid Discord id: {}", id)))
}

/// REST side of the Discord connection
pub struct DiscordGateway {
    http: Arc<Http>,
    info: BotInfo,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>, info: BotInfo) -> Self {
        Self { http, info }
    }
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        let channel = ChannelId::new(snowflake(channel_id)?);
        let sent = channel
            .say(self.http.as_ref(), text)
            .await
            .map_err(|e| BotError::Gateway(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, channel_id: &str, message_id: &str, text: &str) -> Result<(), BotError> {
        let channel = ChannelId::new(snowflake(channel_id)?);
        let message = MessageId::new(snowflake(message_id)?);
        channel
            .edit_message(self.http.as_ref(), message, EditMessage::new().content(text))
            .await
            .map_err(|e| BotError::Gateway(e.to_string()))?;
        Ok(())
    }

    async fn fetch_history(
        &self,
        channel_id: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<HistoryEntry>, BotError> {
        let channel = ChannelId::new(snowflake(channel_id)?);
        let limit = limit.clamp(1, MAX_HISTORY_PAGE) as u8;

        let mut request = GetMessages::new().limit(limit);
        if let Some(cursor) = before {
            request = request.before(MessageId::new(snowflake(cursor)?));
        }

        let messages = channel
            .messages(self.http.as_ref(), request)
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(messages
            .into_iter()
            .map(|m| HistoryEntry::new(m.id.to_string(), m.author.name))
            .collect())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

fn to_user(user: &serenity::all::User) -> User {
    let converted = User::new(user.id.to_string(), user.name.clone());
    if user.bot {
        converted.bot()
    } else {
        converted
    }
}

fn to_incoming(msg: &Message) -> IncomingMessage {
    IncomingMessage::new(to_user(&msg.author), msg.channel_id.to_string(), msg.content.clone())
        .with_mentions(msg.mentions.iter().map(to_user).collect())
}

/// Gateway event handler; one task per event
pub struct DiscordHandler {
    router: Arc<Router>,
    invite_url: Option<String>,
    identity: OnceLock<BotInfo>,
}

impl DiscordHandler {
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            invite_url: None,
            identity: OnceLock::new(),
        }
    }

    pub fn with_invite_url(mut self, url: Option<String>) -> Self {
        self.invite_url = url;
        self
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let info = BotInfo::new(ready.user.id.to_string(), ready.user.name.clone());
        tracing::info!("Logged in as {} ({})", info.name, info.id);
        if let Some(url) = &self.invite_url {
            tracing::info!("Invite: {}", url);
        }
        let _ = self.identity.set(info);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let Some(info) = self.identity.get() else {
            tracing::debug!("Message before ready, skipping");
            return;
        };

        let gateway = DiscordGateway::new(ctx.http.clone(), info.clone());
        let incoming = to_incoming(&msg);

        if let Err(e) = self.router.dispatch(&gateway, &incoming).await {
            tracing::error!("Failed to handle message {}: {}", msg.id, e);
        }
    }
}

/// Connect to Discord and process events until the connection ends
pub async fn run(token: &str, handler: DiscordHandler) -> Result<(), BotError> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| BotError::Gateway(e.to_string()))?;

    tracing::info!("Connecting to Discord gateway");
    client
        .start()
        .await
        .map_err(|e| BotError::Gateway(e.to_string()))
}
