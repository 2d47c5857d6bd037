//! Pattern matching engine for free-text replies
//!
//! Rules are evaluated top to bottom and the first match wins, so the
//! catalog order is a priority ranking: a rule keyed on a keyword plus a
//! question suffix must sit above the bare question-suffix rule.

use crate::domain::entities::Language;
use crate::domain::traits::RandomSource;

/// Which catalog applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Bot was addressed: every rule applies and something is always said
    Mention,
    /// Plain chatter: keyword triggers only, silence otherwise
    Passive,
}

/// Predicate over normalised text
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    Contains(&'static [&'static str]),
    EndsWith(&'static [&'static str]),
    /// Contains one keyword and ends with one suffix
    ContainsEndsWith(&'static [&'static str], &'static [&'static str]),
}

impl Trigger {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Trigger::Contains(words) => words.iter().any(|w| text.contains(w)),
            Trigger::EndsWith(suffixes) => suffixes.iter().any(|s| text.ends_with(s)),
            Trigger::ContainsEndsWith(words, suffixes) => {
                words.iter().any(|w| text.contains(w)) && suffixes.iter().any(|s| text.ends_with(s))
            }
        }
    }
}

/// Dynamic work a rule hands back to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Weather,
    News,
    Ranking,
    Dice(u64),
    /// Translate the first 「…」 span of the message
    TranslateQuoted(Language),
    /// Random upload from the configured featured channel
    FeaturedVideo,
}

#[derive(Debug, Clone, Copy)]
pub enum Response {
    /// Pick one candidate uniformly
    Static(&'static [&'static str]),
    Action(Action),
}

#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub response: Response,
}

/// What the engine decided for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Reply(String),
    Invoke(Action),
}

const QUESTION: &[&str] = &["？", "?"];

pub static MENTION_RULES: &[PatternRule] = &[
    PatternRule { name: "translate-en", trigger: Trigger::Contains(&["英語で"]), response: Response::Action(Action::TranslateQuoted(Language::English)) },
    PatternRule { name: "translate-ja", trigger: Trigger::Contains(&["日本語で"]), response: Response::Action(Action::TranslateQuoted(Language::Japanese)) },
    PatternRule { name: "weather", trigger: Trigger::Contains(&["天気"]), response: Response::Action(Action::Weather) },
    PatternRule { name: "dice", trigger: Trigger::Contains(&["さいころ", "サイコロ"]), response: Response::Action(Action::Dice(6)) },
    PatternRule { name: "news", trigger: Trigger::Contains(&["ニュース"]), response: Response::Action(Action::News) },
    PatternRule { name: "ranking", trigger: Trigger::Contains(&["ランキング"]), response: Response::Action(Action::Ranking) },
    PatternRule {
        name: "hungry",
        trigger: Trigger::Contains(&["おなかすいた", "おなすき"]),
        response: Response::Static(&[
            "栄養あるものをしっかり食べようね！",
            "ぐぐぅぅー",
            "実は /gurume コマンドは /gourmet や /grm と打っても使えるよ！",
        ]),
    },
    PatternRule {
        name: "morning",
        trigger: Trigger::Contains(&["おはよ"]),
        response: Response::Static(&["おはよう〜！", "きょうもがんばろうね！", "ねむい……顔、洗わなきゃ・・・・", "(n'∀')η ﾔｧｰｯﾎｫｰ!!"]),
    },
    PatternRule { name: "hello", trigger: Trigger::Contains(&["こんにち"]), response: Response::Static(&["こんにちは〜！"]) },
    PatternRule {
        name: "night",
        trigger: Trigger::Contains(&["おやすみ"]),
        response: Response::Static(&[
            "おやすみ〜",
            "ｚｚｚ。。。。。",
            "また明日〜",
            "明日はもっといい日にしようね！",
            "もうこんな時間なんだね、おやすみなさい",
        ]),
    },
    PatternRule {
        name: "sleepy",
        trigger: Trigger::Contains(&["ねむい", "眠い"]),
        response: Response::Static(&["だよねわかる・・・・", "うとうと・・・・", "もう寝よう？", "眠って、楽になっちゃおうよ？"]),
    },
    PatternRule { name: "how-are-you", trigger: Trigger::Contains(&["元気？"]), response: Response::Static(&["うん！ ありがと！", "元気だよー！！"]) },
    PatternRule {
        name: "cute",
        trigger: Trigger::Contains(&["かわい"]),
        response: Response::Static(&["えへへ :heartbeat:", "そ……そうかな…", "や……やっぱり？！ なんて…", "照れるよお・・・・"]),
    },
    PatternRule { name: "love-lots", trigger: Trigger::Contains(&["大好き", "だいすき"]), response: Response::Static(&["私もだよ！"]) },
    PatternRule {
        name: "like",
        trigger: Trigger::Contains(&["好き", "すき"]),
        response: Response::Static(&["いいねいいね！！ :sparkles: :sparkles:", "わたしもわたしも！ :white_flower:", ":heartpulse: 大好きだよ！！ :heartpulse:"]),
    },
    PatternRule {
        name: "love",
        trigger: Trigger::Contains(&["愛して", "あいして"]),
        response: Response::Static(&[
            "えっ………",
            "ちょっと気持ち悪い",
            "そういうのはちょっと………",
            "普通にキモいんですけど、、",
            "なに言ってるんですか？",
            "やめてください……体調悪くなりました",
            "ヒィッッ！！ 近付かないで！！！！",
        ]),
    },
    PatternRule {
        name: "thanks",
        trigger: Trigger::Contains(&["ありがと"]),
        response: Response::Static(&["どういたしまして！", "いえいえ〜〜", "今後ともごひいきにー！"]),
    },
    PatternRule {
        name: "cheer",
        trigger: Trigger::Contains(&["がんば"]),
        response: Response::Static(&["いっしょにがんばろー！", "楽しい日になるといいね！", "わっしょい！ わっしょい！ └(ﾟ∀ﾟ└)", "ファイトオー！ :fire:"]),
    },
    PatternRule {
        name: "bear",
        trigger: Trigger::Contains(&["くまくま"]),
        response: Response::Static(&[
            "ざわ……ざわ……",
            "ʕ•̀ω•́ʔ  ʕ•̀ω•́ʔ  ʕ•̀ω•́ʔ  ʕ•̀ω•́ʔ",
            "ฅʕ•ᴥ•ʔฅ ʕ´•ᴥ•`ʔ",
            "(σ´･(ｪ)･)σﾖﾛｼｸﾏｰ!!",
            "つられクマー！！ ＞ ＜",
            "（´・(ェ)・｀） くま？",
            "いわもウェイ！！",
            "ざわわ、ざわわ、ざわわ",
        ]),
    },
    PatternRule {
        name: "tired",
        trigger: Trigger::Contains(&["疲れ", "つかれ"]),
        response: Response::Static(&["よしよし・・・ ( ,,´・ω・)ﾉ (´っω・｀｡)", "すこし休もうねー？ ヾ(´ー｀*)", "生きてるからまだ大丈夫だよ！"]),
    },
    PatternRule {
        name: "hard",
        trigger: Trigger::Contains(&["つらい", "ちゅらい"]),
        response: Response::Static(&["わかる・・・", "5000兆円あげるから元気だして", "よしよし・・・ ( ,,´・ω・)ﾉ (´っω・｀｡)", "休んでもいいんだよ？ _(* v v)。"]),
    },
    PatternRule {
        name: "dying",
        trigger: Trigger::Contains(&["死に"]),
        response: Response::Static(&["生きてーーーーーっっっっ！！！！ (> <!!!!", "へんじがない、ただのしかばねのようだ", "まだ死ぬには早いですよ！", "にゃにゃにゃにゃにゃ！"]),
    },
    PatternRule {
        name: "cat",
        trigger: Trigger::Contains(&["にゃん", "にゃー"]),
        response: Response::Static(&["にゃ〜ん :cat2:", "わかるにゃ・・・・・", "みゃみゃ〜ん！ V(=^・ω・^=)v", "(」・ω・)」うー！(/・ω・)/にゃー！"]),
    },
    PatternRule { name: "bored", trigger: Trigger::Contains(&["ひま", "ヒマ", "暇"]), response: Response::Action(Action::News) },
    PatternRule { name: "anime", trigger: Trigger::Contains(&["アニメ"]), response: Response::Static(&["アニメといえばキルミーベイベーだよね！"]) },
    PatternRule {
        name: "excited",
        trigger: Trigger::EndsWith(&["！！", "!!"]),
        response: Response::Static(&["そうだね！！！", "元気いっぱいだねー！！", "うん！！"]),
    },
    PatternRule { name: "featured-channel", trigger: Trigger::ContainsEndsWith(&["ゆーま"], QUESTION), response: Response::Action(Action::FeaturedVideo) },
    PatternRule {
        name: "question",
        trigger: Trigger::EndsWith(QUESTION),
        response: Response::Static(&["そうかも？", "わからぬ〜", "むずかしい質問だねー", "知らなーい", "そうなの？"]),
    },
    PatternRule { name: "help", trigger: Trigger::Contains(&["help"]), response: Response::Static(&["コマンドについては /help を使ってね！"]) },
];

pub static PASSIVE_RULES: &[PatternRule] = &[
    PatternRule { name: "weather", trigger: Trigger::Contains(&["天気は？"]), response: Response::Action(Action::Weather) },
];

pub static ACKNOWLEDGEMENTS: &[&str] = &["なるほど〜", "それそれ！！", "ニャンニャン (ﾉ*ФωФ) //", "そうなんだ〜", "うんうん！"];

/// Ordered rule tables for both modes
pub struct PatternEngine {
    mention: Vec<PatternRule>,
    passive: Vec<PatternRule>,
    acknowledgements: Vec<&'static str>,
}

impl PatternEngine {
    pub fn new() -> Self {
        Self::with_rules(MENTION_RULES, PASSIVE_RULES, ACKNOWLEDGEMENTS)
    }

    /// Custom catalogs; an empty acknowledgement set falls back to the defaults
    /// so mention mode always has something to say
    pub fn with_rules(
        mention: &[PatternRule],
        passive: &[PatternRule],
        acknowledgements: &[&'static str],
    ) -> Self {
        let acknowledgements = if acknowledgements.is_empty() {
            ACKNOWLEDGEMENTS
        } else {
            acknowledgements
        };

        Self {
            mention: mention.to_vec(),
            passive: passive.to_vec(),
            acknowledgements: acknowledgements.to_vec(),
        }
    }

    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// First rule matching `text` in the given mode
    pub fn find(&self, text: &str, mode: Mode) -> Option<&PatternRule> {
        let normalized = Self::normalize(text);
        let rules = match mode {
            Mode::Mention => &self.mention,
            Mode::Passive => &self.passive,
        };
        rules.iter().find(|rule| rule.trigger.matches(&normalized))
    }

    /// Decide the reply for `text`; `None` only happens in passive mode
    pub fn resolve(&self, text: &str, mode: Mode, random: &dyn RandomSource) -> Option<Resolution> {
        match self.find(text, mode) {
            Some(rule) => {
                tracing::debug!("Pattern '{}' matched", rule.name);
                Some(match rule.response {
                    Response::Static(candidates) => Resolution::Reply(random.pick(candidates).to_string()),
                    Response::Action(action) => Resolution::Invoke(action),
                })
            }
            None => match mode {
                Mode::Mention => Some(Resolution::Reply(random.pick(&self.acknowledgements).to_string())),
                Mode::Passive => None,
            },
        }
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Text strictly between the first 「 and the first 」 after it
pub fn extract_quoted(text: &str) -> Option<&str> {
    let start = text.find('「')? + '「'.len_utf8();
    let end = text[start..].find('」')?;
    Some(&text[start..start + end])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct First;

    impl RandomSource for First {
        fn below(&self, _upper: usize) -> usize {
            0
        }
    }

    fn rule_name(text: &str) -> Option<&'static str> {
        PatternEngine::new().find(text, Mode::Mention).map(|r| r.name)
    }

    #[test]
    fn test_catalog_candidates_are_non_empty() {
        for rule in MENTION_RULES.iter().chain(PASSIVE_RULES) {
            if let Response::Static(candidates) = rule.response {
                assert!(!candidates.is_empty(), "rule {} has no replies", rule.name);
            }
        }
    }

    #[test]
    fn test_keyword_question_wins_over_plain_question() {
        assert_eq!(rule_name("ゆーまって誰？"), Some("featured-channel"));
        assert_eq!(rule_name("ゆーまって誰?"), Some("featured-channel"));
        assert_eq!(rule_name("それって本当？"), Some("question"));
        assert_eq!(rule_name("ゆーまだよ"), None);
    }

    #[test]
    fn test_earlier_rule_shadows_later_match() {
        // "だいすき" also contains "すき"
        assert_eq!(rule_name("だいすき"), Some("love-lots"));
        assert_eq!(rule_name("すき"), Some("like"));
        // keyword rules sit above the suffix rules
        assert_eq!(rule_name("天気どう？"), Some("weather"));
        assert_eq!(rule_name("おはよう！！"), Some("morning"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(rule_name("HELP me"), Some("help"));
    }

    #[test]
    fn test_mention_mode_always_replies() {
        let engine = PatternEngine::new();
        assert_eq!(
            engine.resolve("zzz", Mode::Mention, &First),
            Some(Resolution::Reply("なるほど〜".to_string()))
        );
    }

    #[test]
    fn test_passive_mode_is_silent_without_match() {
        let engine = PatternEngine::new();
        assert_eq!(engine.resolve("おはよう", Mode::Passive, &First), None);
        assert_eq!(
            engine.resolve("明日の天気は？", Mode::Passive, &First),
            Some(Resolution::Invoke(Action::Weather))
        );
    }

    #[test]
    fn test_static_reply_uses_random_pick() {
        let engine = PatternEngine::new();
        assert_eq!(
            engine.resolve("こんにちは", Mode::Mention, &First),
            Some(Resolution::Reply("こんにちは〜！".to_string()))
        );
    }

    #[test]
    fn test_custom_catalog_order() {
        static RULES: &[PatternRule] = &[
            PatternRule { name: "a", trigger: Trigger::Contains(&["x"]), response: Response::Static(&["first"]) },
            PatternRule { name: "b", trigger: Trigger::Contains(&["xy"]), response: Response::Static(&["second"]) },
        ];
        let engine = PatternEngine::with_rules(RULES, &[], &[]);
        assert_eq!(engine.find("xy", Mode::Mention).map(|r| r.name), Some("a"));
        assert_eq!(engine.resolve("zz", Mode::Passive, &First), None);
    }

    #[test]
    fn test_empty_acknowledgements_fall_back_to_defaults() {
        let engine = PatternEngine::with_rules(&[], &[], &[]);
        assert_eq!(
            engine.resolve("zz", Mode::Mention, &First),
            Some(Resolution::Reply(ACKNOWLEDGEMENTS[0].to_string()))
        );
    }

    #[test]
    fn test_extract_quoted() {
        assert_eq!(extract_quoted("英語で「こんにちは」"), Some("こんにちは"));
        assert_eq!(extract_quoted("「a」と「b」"), Some("a"));
        assert_eq!(extract_quoted("「外「内」」"), Some("外「内"));
        assert_eq!(extract_quoted("「」"), Some(""));
        assert_eq!(extract_quoted("英語で こんにちは"), None);
        assert_eq!(extract_quoted("英語で「こんにちは"), None);
        assert_eq!(extract_quoted("」逆「"), None);
    }
}
