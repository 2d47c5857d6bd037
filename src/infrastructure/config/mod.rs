//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration, read-only after startup
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub credentials: CredentialsConfig,
    pub endpoints: EndpointsConfig,
    pub features: FeaturesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub client_id: Option<String>,
    pub token: Option<String>,
}

/// Provider API keys
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CredentialsConfig {
    pub rss2json_api_key: String,
    pub recruit_api_key: String,
    pub custom_search_engine_id: String,
    pub custom_search_api_key: String,
    pub youtube_data_api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EndpointsConfig {
    pub weather: String,
    pub rss2json: String,
    pub hotpepper: String,
    pub custom_search: String,
    pub youtube_data: String,
    pub translate: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeaturesConfig {
    pub weather_city_id: u32,
    /// Pinpoint location whose detail link is appended to forecasts
    pub weather_pinpoint: String,
    pub news_rss_url: String,
    /// Number of recent messages sampled by the activity ranking
    pub rank_total_count: usize,
    pub gourmet_default_area: String,
    pub featured_channel_id: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "kizuna-bot".to_string(),
                prefix: "/".to_string(),
                client_id: None,
                token: None,
            },
            credentials: CredentialsConfig::default(),
            endpoints: EndpointsConfig {
                weather: "https://weather.tsukumijima.net/api/forecast".to_string(),
                rss2json: "https://api.rss2json.com/v1/api.json".to_string(),
                hotpepper: "https://webservice.recruit.co.jp/hotpepper/gourmet/v1".to_string(),
                custom_search: "https://www.googleapis.com/customsearch/v1".to_string(),
                youtube_data: "https://www.googleapis.com/youtube/v3".to_string(),
                translate: "https://script.google.com/macros/s/AKfycbzX3hgwpkCG-q-47nvu9CpeGXJ2uoQVbAngwNpbHjx6jCiOMXE/exec".to_string(),
            },
            features: FeaturesConfig {
                weather_city_id: 130010,
                weather_pinpoint: "渋谷区".to_string(),
                news_rss_url: "https://b.hatena.ne.jp/hotentry?mode=rss".to_string(),
                rank_total_count: 200,
                gourmet_default_area: "渋谷駅".to_string(),
                featured_channel_id: "UC_9DxYZ_4Lhm9ujFvcHryNw".to_string(),
                request_timeout_secs: 30,
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }

    /// Overlay environment variables on top of this config
    pub fn with_env(mut self) -> Self {
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            self.bot.token = Some(token);
        }
        if let Ok(client_id) = std::env::var("BOT_CLIENT_ID") {
            self.bot.client_id = Some(client_id);
        }
        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        let creds = &mut self.credentials;
        for (var, slot) in [
            ("RSS2JSON_API_KEY", &mut creds.rss2json_api_key),
            ("RECRUIT_API_KEY", &mut creds.recruit_api_key),
            ("CUSTOM_SEARCH_ENGINE_ID", &mut creds.custom_search_engine_id),
            ("CUSTOM_SEARCH_API_KEY", &mut creds.custom_search_api_key),
            ("YOUTUBE_DATA_API_KEY", &mut creds.youtube_data_api_key),
        ] {
            if let Ok(value) = std::env::var(var) {
                *slot = value;
            }
        }

        if let Ok(count) = std::env::var("RANK_TOTAL_COUNT") {
            match count.parse() {
                Ok(n) => self.features.rank_total_count = n,
                Err(_) => tracing::warn!("Ignoring invalid RANK_TOTAL_COUNT: {}", count),
            }
        }

        self
    }

    /// The gateway token; its absence prevents startup
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.bot
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("BOT_TOKEN".to_string()))
    }

    pub fn invite_url(&self) -> Option<String> {
        self.bot.client_id.as_ref().map(|id| {
            format!(
                "https://discord.com/api/oauth2/authorize?client_id={}&permissions=2048&scope=bot",
                id
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot.prefix, "/");
        assert_eq!(config.features.rank_total_count, 200);
        assert_eq!(config.features.weather_city_id, 130010);
        assert_eq!(config.features.request_timeout_secs, 30);
    }

    #[test]
    fn test_yaml_round_trip_keeps_endpoints() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("rank-total-count"));
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.endpoints.hotpepper, Config::default().endpoints.hotpepper);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let mut config = Config::default();
        assert!(matches!(config.require_token(), Err(ConfigError::MissingField(_))));

        config.bot.token = Some(String::new());
        assert!(config.require_token().is_err());

        config.bot.token = Some("abc".to_string());
        assert_eq!(config.require_token().unwrap(), "abc");
    }

    #[test]
    fn test_invite_url_needs_client_id() {
        let mut config = Config::default();
        assert!(config.invite_url().is_none());

        config.bot.client_id = Some("123".to_string());
        assert!(config.invite_url().unwrap().contains("client_id=123"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(Config::from_yaml("bot: ["), Err(ConfigError::Parse(_))));
    }
}
