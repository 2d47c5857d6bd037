//! Router - turns one incoming event into at most one reply

use std::sync::Arc;
use std::time::Instant;

use super::parser::{Intent, MessageParser};
use super::patterns::{extract_quoted, Action, Mode, PatternEngine, Resolution};
use crate::application::errors::BotError;
use crate::application::services::command_service::{apology, dice_faces, roll_dice, split_area};
use crate::application::services::{CommandService, RankingService};
use crate::domain::entities::{CapabilityResult, Command, CommandKind, IncomingMessage, Language, Reply};
use crate::domain::traits::{Capabilities, ChatGateway, RandomSource};

pub const DEFAULT_RANK_SAMPLE: usize = 200;

const EMPTY_TRANSLATION: &str = "翻訳するテキストを入力してね！";

pub struct Router {
    parser: MessageParser,
    commands: CommandService,
    patterns: PatternEngine,
    ranking: RankingService,
    capabilities: Arc<dyn Capabilities>,
    random: Arc<dyn RandomSource>,
    featured_channel_id: String,
}

impl Router {
    pub fn new(
        prefix: impl Into<String>,
        capabilities: Arc<dyn Capabilities>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            commands: CommandService::with_defaults(),
            patterns: PatternEngine::new(),
            ranking: RankingService::new(DEFAULT_RANK_SAMPLE),
            capabilities,
            random,
            featured_channel_id: String::new(),
        }
    }

    /// Number of recent messages the ranking samples
    pub fn with_rank_sample(mut self, sample_size: usize) -> Self {
        self.ranking = RankingService::new(sample_size);
        self
    }

    pub fn with_featured_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.featured_channel_id = channel_id.into();
        self
    }

    /// Decide the reply for one event; `None` means stay silent
    pub async fn handle_event(
        &self,
        gateway: &dyn ChatGateway,
        message: &IncomingMessage,
    ) -> Option<Reply> {
        let bot = gateway.bot_info();

        match self.parser.classify(message, &bot) {
            Intent::Ignore => None,
            Intent::Command(command) => self.run_command(gateway, message, &command).await,
            Intent::Mention(text) => {
                let resolution = self.patterns.resolve(&text, Mode::Mention, self.random.as_ref())?;
                self.apply(gateway, message, &text, resolution).await
            }
            Intent::Passive(text) => {
                let resolution = self.patterns.resolve(&text, Mode::Passive, self.random.as_ref())?;
                self.apply(gateway, message, &text, resolution).await
            }
        }
    }

    /// Handle one event and deliver the reply through the gateway
    pub async fn dispatch(
        &self,
        gateway: &dyn ChatGateway,
        message: &IncomingMessage,
    ) -> Result<(), BotError> {
        let Some(reply) = self.handle_event(gateway, message).await else {
            return Ok(());
        };

        match reply {
            Reply::Text(text) => {
                gateway.send_message(&message.channel_id, &text).await?;
            }
            Reply::Latency => {
                let started = Instant::now();
                let sent = gateway.send_message(&message.channel_id, "Pong！").await?;
                let elapsed = started.elapsed().as_secs_f64();
                gateway
                    .edit_message(
                        &message.channel_id,
                        &sent,
                        &format!("Pong！ 応答までに {:.3} 秒かかったよ！", elapsed),
                    )
                    .await?;
            }
        }

        Ok(())
    }

    async fn run_command(
        &self,
        gateway: &dyn ChatGateway,
        message: &IncomingMessage,
        command: &Command,
    ) -> Option<Reply> {
        let Some(kind) = self.commands.resolve(&command.name) else {
            tracing::debug!("Ignoring unknown command '{}'", command.name);
            return None;
        };

        tracing::info!(
            "Command {}{} from {}",
            self.parser.prefix(),
            command.name,
            message.author
        );
        let caps = self.capabilities.as_ref();

        let text = match kind {
            CommandKind::Ping => return Some(Reply::Latency),
            CommandKind::Help => self.commands.help_text(self.parser.prefix()),
            CommandKind::Weather => caps.weather().await.into_reply(apology::WEATHER),
            CommandKind::News => caps.news().await.into_reply(apology::NEWS),
            CommandKind::Dice => {
                let faces = dice_faces(command.args.first().map(String::as_str));
                roll_dice(faces, self.random.as_ref())
            }
            CommandKind::Gourmet => {
                let (area, keyword) = split_area(&command.args);
                caps.gourmet(&area, &keyword).await.into_reply(apology::GOURMET)
            }
            CommandKind::Image => caps
                .image(&command.joined_args())
                .await
                .into_reply(apology::IMAGE),
            CommandKind::Rank => self.rank(gateway, &message.channel_id).await,
            CommandKind::Translate(target) => {
                let source = command.joined_args();
                if source.trim().is_empty() {
                    EMPTY_TRANSLATION.to_string()
                } else {
                    caps.translate(&source, target).await.into_reply(apology::TRANSLATE)
                }
            }
            CommandKind::Video => caps
                .video(&command.joined_args())
                .await
                .into_reply(apology::VIDEO),
            CommandKind::VTuber => {
                let query = format!("VTuber {}", command.joined_args());
                caps.video(query.trim()).await.into_reply(apology::VTUBER)
            }
        };

        Some(Reply::Text(text))
    }

    async fn apply(
        &self,
        gateway: &dyn ChatGateway,
        message: &IncomingMessage,
        text: &str,
        resolution: Resolution,
    ) -> Option<Reply> {
        let action = match resolution {
            Resolution::Reply(reply) => return Some(Reply::Text(reply)),
            Resolution::Invoke(action) => action,
        };

        let caps = self.capabilities.as_ref();
        let reply = match action {
            Action::Weather => caps.weather().await.into_reply(apology::WEATHER),
            Action::News => caps.news().await.into_reply(apology::NEWS),
            Action::Ranking => self.rank(gateway, &message.channel_id).await,
            Action::Dice(faces) => roll_dice(faces, self.random.as_ref()),
            Action::TranslateQuoted(target) => self.translate_quoted(text, target).await,
            Action::FeaturedVideo => match caps.channel_video(&self.featured_channel_id).await {
                CapabilityResult::Success(url) => {
                    format!("ゆーまってこの人かな？！ (੭ु ›ω‹ )੭ु⁾⁾ {}", url)
                }
                CapabilityResult::Empty(reason) => {
                    tracing::debug!("No featured upload: {}", reason);
                    apology::FEATURED_VIDEO.to_string()
                }
                failure => failure.into_reply(apology::FEATURED_VIDEO),
            },
        };

        Some(Reply::Text(reply))
    }

    async fn translate_quoted(&self, text: &str, target: Language) -> String {
        match extract_quoted(text) {
            Some(source) if !source.trim().is_empty() => self
                .capabilities
                .translate(source, target)
                .await
                .into_reply(apology::TRANSLATE),
            _ => target.quote_hint().to_string(),
        }
    }

    async fn rank(&self, gateway: &dyn ChatGateway, channel_id: &str) -> String {
        self.ranking
            .rank(gateway, channel_id, self.random.as_ref())
            .await
            .into_reply(apology::RANKING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::traits::BotInfo;
    use crate::domain::entities::HistoryEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct NullGateway {
        sent: Mutex<Vec<String>>,
        edits: Mutex<Vec<String>>,
    }

    impl NullGateway {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                edits: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatGateway for NullGateway {
        async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok("m1".to_string())
        }

        async fn edit_message(&self, _channel_id: &str, message_id: &str, text: &str) -> Result<(), BotError> {
            assert_eq!(message_id, "m1");
            self.edits.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn fetch_history(&self, _channel_id: &str, _limit: usize, _before: Option<&str>) -> Result<Vec<HistoryEntry>, BotError> {
            Ok(Vec::new())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo::new("99", "kizuna")
        }
    }

    struct Echo;

    #[async_trait]
    impl Capabilities for Echo {
        async fn weather(&self) -> CapabilityResult {
            CapabilityResult::Success("sunny".to_string())
        }
        async fn news(&self) -> CapabilityResult {
            CapabilityResult::Success("news".to_string())
        }
        async fn gourmet(&self, area: &str, keyword: &str) -> CapabilityResult {
            CapabilityResult::Success(format!("{}|{}", area, keyword))
        }
        async fn image(&self, query: &str) -> CapabilityResult {
            CapabilityResult::Success(query.to_string())
        }
        async fn video(&self, query: &str) -> CapabilityResult {
            CapabilityResult::Success(query.to_string())
        }
        async fn channel_video(&self, channel_id: &str) -> CapabilityResult {
            if channel_id.is_empty() {
                return CapabilityResult::Empty("チャンネルが指定されていないよ".to_string());
            }
            CapabilityResult::Success(channel_id.to_string())
        }
        async fn translate(&self, text: &str, target: Language) -> CapabilityResult {
            CapabilityResult::Success(format!("{}:{}", target.code(), text))
        }
    }

    struct First;

    impl RandomSource for First {
        fn below(&self, _upper: usize) -> usize {
            0
        }
    }

    fn router() -> Router {
        Router::new("/", Arc::new(Echo), Arc::new(First)).with_featured_channel("UCX")
    }

    fn from_user(text: &str) -> IncomingMessage {
        IncomingMessage::new(User::new("1", "alice"), "c1", text)
    }

    #[tokio::test]
    async fn test_vtuber_prefixes_query() {
        let gw = NullGateway::new();
        let reply = router().handle_event(&gw, &from_user("/vtuber 歌枠")).await;
        assert_eq!(reply, Some(Reply::Text("VTuber 歌枠".to_string())));

        let reply = router().handle_event(&gw, &from_user("/vtuber")).await;
        assert_eq!(reply, Some(Reply::Text("VTuber".to_string())));
    }

    #[tokio::test]
    async fn test_gourmet_splits_area_and_keyword() {
        let gw = NullGateway::new();
        let reply = router().handle_event(&gw, &from_user("/grm 新宿 焼肉 個室")).await;
        assert_eq!(reply, Some(Reply::Text("新宿|焼肉 個室".to_string())));
    }

    #[tokio::test]
    async fn test_translate_without_text() {
        let gw = NullGateway::new();
        let reply = router().handle_event(&gw, &from_user("/eng")).await;
        assert_eq!(reply, Some(Reply::Text(EMPTY_TRANSLATION.to_string())));
    }

    #[tokio::test]
    async fn test_quoted_translation_keeps_case() {
        let gw = NullGateway::new();
        let msg = from_user("<@99> 日本語で「Good Morning」").with_mention(User::new("99", "kizuna").bot());
        let reply = router().handle_event(&gw, &msg).await;
        assert_eq!(reply, Some(Reply::Text("ja:Good Morning".to_string())));

        let msg = from_user("<@99> 英語で教えて").with_mention(User::new("99", "kizuna").bot());
        let reply = router().handle_event(&gw, &msg).await;
        assert_eq!(reply, Some(Reply::Text(Language::English.quote_hint().to_string())));
    }

    #[tokio::test]
    async fn test_featured_channel_video() {
        let gw = NullGateway::new();
        let msg = from_user("<@99> ゆーまって誰？").with_mention(User::new("99", "kizuna").bot());
        let reply = router().handle_event(&gw, &msg).await;
        assert_eq!(
            reply,
            Some(Reply::Text("ゆーまってこの人かな？！ (੭ु ›ω‹ )੭ु⁾⁾ UCX".to_string()))
        );
    }

    #[tokio::test]
    async fn test_featured_channel_without_uploads_apologises() {
        let gw = NullGateway::new();
        let router = Router::new("/", Arc::new(Echo), Arc::new(First));
        let msg = from_user("<@99> ゆーまって誰？").with_mention(User::new("99", "kizuna").bot());
        let reply = router.handle_event(&gw, &msg).await;
        assert_eq!(reply, Some(Reply::Text(apology::FEATURED_VIDEO.to_string())));
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let gw = NullGateway::new();
        let router = Router::new("!", Arc::new(Echo), Arc::new(First));
        let reply = router.handle_event(&gw, &from_user("!video 猫")).await;
        assert_eq!(reply, Some(Reply::Text("猫".to_string())));
        assert_eq!(router.handle_event(&gw, &from_user("/video 猫")).await, None);
    }

    #[tokio::test]
    async fn test_ping_sends_then_edits() {
        let gw = NullGateway::new();
        router().dispatch(&gw, &from_user("/ping")).await.unwrap();

        assert_eq!(*gw.sent.lock().unwrap(), vec!["Pong！".to_string()]);
        let edits = gw.edits.lock().unwrap();
        assert_eq!(edits.len(), 1);
        assert!(edits[0].starts_with("Pong！ 応答までに "));
        assert!(edits[0].ends_with(" 秒かかったよ！"));
    }

    #[tokio::test]
    async fn test_silent_event_sends_nothing() {
        let gw = NullGateway::new();
        router().dispatch(&gw, &from_user("/nope")).await.unwrap();
        router().dispatch(&gw, &from_user("ただの雑談")).await.unwrap();
        assert!(gw.sent.lock().unwrap().is_empty());
    }
}
