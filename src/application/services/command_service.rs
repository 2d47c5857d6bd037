use crate::domain::entities::{CommandKind, CommandRegistry, CommandSpec, Language};
use crate::domain::traits::RandomSource;

/// Replies used when a capability call fails outright
pub mod apology {
    pub const WEATHER: &str = "天気情報の取得に失敗しました。しばらく時間をおいてからお試しください。";
    pub const NEWS: &str = "ニュース取得に失敗しました。しばらく時間をおいてからお試しください。";
    pub const GOURMET: &str = "グルメ検索に失敗しました。しばらく時間をおいてからお試しください。";
    pub const IMAGE: &str = "画像検索に失敗しました。しばらく時間をおいてからお試しください。";
    pub const VIDEO: &str = "動画検索に失敗しました。しばらく時間をおいてからお試しください。";
    pub const VTUBER: &str = "VTuber動画検索に失敗しました。しばらく時間をおいてからお試しください。";
    pub const TRANSLATE: &str = "翻訳に失敗しました。しばらく時間をおいてからお試しください。";
    pub const RANKING: &str = "ランキングの集計に失敗しました。しばらく時間をおいてからお試しください。";
    pub const FEATURED_VIDEO: &str = "ゆーまの動画が見つからなかったよ";
}

pub const DEFAULT_DICE_FACES: u64 = 6;

/// Service for resolving commands and the command-only replies
pub struct CommandService {
    registry: CommandRegistry,
}

impl CommandService {
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
        }
    }

    /// Service with the full command table registered
    pub fn with_defaults() -> Self {
        let mut service = Self::new();
        service.register_defaults();
        service
    }

    pub fn register(&mut self, command: CommandSpec) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        let table = [
            CommandSpec::new("weather", CommandKind::Weather)
                .with_description("天気を教えるよ〜 :white_sun_small_cloud:"),
            CommandSpec::new("news", CommandKind::News)
                .with_description("話題の記事をお届けしちゃうよ！ 暇な時はこれ！ :newspaper:"),
            CommandSpec::new("gurume", CommandKind::Gourmet)
                .with_aliases(&["gourmet", "grm"])
                .with_description("お料理屋さんを探すよ、「/gurume 新宿 焼肉,個室,食べ放題」みたいに使ってね。カンマは「、」でもOK！ :fork_knife_plate:"),
            CommandSpec::new("image", CommandKind::Image)
                .with_aliases(&["img"])
                .with_description("いい写真を見つけてくるよ！ 1日100回までしか検索できないみたい… :art:"),
            CommandSpec::new("dice", CommandKind::Dice)
                .with_description("サイコロを回すよ。引数があると、それを最大値とするサイコロを回すよ :game_die:"),
            CommandSpec::new("rank", CommandKind::Rank)
                .with_description("最近ヒマそうにしてる人を教えてあげるね :kiss_ww:"),
            CommandSpec::new("eng", CommandKind::Translate(Language::English))
                .with_description("英語でなんて言うのかがんばって翻訳するよ！ :capital_abcd:"),
            CommandSpec::new("jpn", CommandKind::Translate(Language::Japanese))
                .with_aliases(&["jap"])
                .with_description("日本語でどう言うのか考えるよ！ :flag_jp:"),
            CommandSpec::new("video", CommandKind::Video)
                .with_aliases(&["youtube"])
                .with_description("YouTubeから動画を探してくるよ！ 「/video ゲーム実況」みたいに使ってね :arrow_forward:"),
            CommandSpec::new("vtuber", CommandKind::VTuber)
                .with_description("VTuberさんの動画を探してくるよ！ :dancer:"),
            CommandSpec::new("ping", CommandKind::Ping).with_description("テスト用だよ"),
            CommandSpec::new("help", CommandKind::Help).with_description("これだよ"),
        ];

        for command in table {
            self.register(command);
        }
    }

    pub fn resolve(&self, name: &str) -> Option<CommandKind> {
        self.registry.find(name).map(|c| c.kind)
    }

    /// One line per command, in registration order
    pub fn help_text(&self, prefix: &str) -> String {
        self.registry
            .all()
            .map(|cmd| {
                let aliases: Vec<String> = cmd
                    .aliases
                    .iter()
                    .map(|a| format!(", {}{}", prefix, a))
                    .collect();
                format!(
                    "{}{}{} : {}",
                    prefix,
                    cmd.name,
                    aliases.concat(),
                    cmd.description.as_deref().unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CommandService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Faces requested by the first argument; non-positive or unparsable falls back
pub fn dice_faces(arg: Option<&str>) -> u64 {
    arg.and_then(|a| a.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_DICE_FACES)
}

pub fn roll_dice(faces: u64, random: &dyn RandomSource) -> String {
    let faces = faces.max(1);
    let result = random.roll(faces);
    format!("{}面サイコロを回したら、「{}」が出たよ！", faces, result)
}

/// Join command arguments, treating the first one as the search area
pub fn split_area(args: &[String]) -> (String, String) {
    let area = args.first().cloned().unwrap_or_default();
    let keyword = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();
    (area, keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Max;

    impl RandomSource for Max {
        fn below(&self, upper: usize) -> usize {
            upper - 1
        }
    }

    #[test]
    fn test_aliases_resolve_to_same_handler() {
        let service = CommandService::with_defaults();
        for name in ["gourmet", "gurume", "grm", "GRM"] {
            assert_eq!(service.resolve(name), Some(CommandKind::Gourmet));
        }
        assert_eq!(service.resolve("jap"), Some(CommandKind::Translate(Language::Japanese)));
        assert_eq!(service.resolve("youtube"), Some(CommandKind::Video));
        assert_eq!(service.resolve("start"), None);
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = CommandService::with_defaults().help_text("/");
        assert!(help.starts_with("/weather : "));
        assert!(help.contains("/gurume, /gourmet, /grm : "));
        assert!(help.contains("/video, /youtube : "));
        assert!(help.ends_with("/help : これだよ"));
        assert_eq!(help.lines().count(), 12);
    }

    #[test]
    fn test_dice_faces() {
        assert_eq!(dice_faces(Some("20")), 20);
        assert_eq!(dice_faces(Some("5000000000")), 5_000_000_000);
        assert_eq!(dice_faces(Some("0")), 6);
        assert_eq!(dice_faces(Some("-3")), 6);
        assert_eq!(dice_faces(Some("abc")), 6);
        assert_eq!(dice_faces(None), 6);
    }

    #[test]
    fn test_roll_dice_message() {
        assert_eq!(roll_dice(20, &Max), "20面サイコロを回したら、「20」が出たよ！");
        assert_eq!(
            roll_dice(5_000_000_000, &Max),
            "5000000000面サイコロを回したら、「5000000000」が出たよ！"
        );
    }

    #[test]
    fn test_split_area() {
        let args: Vec<String> = ["新宿", "焼肉", "個室"].iter().map(|s| s.to_string()).collect();
        assert_eq!(split_area(&args), ("新宿".to_string(), "焼肉 個室".to_string()));
        assert_eq!(split_area(&[]), (String::new(), String::new()));
    }
}
