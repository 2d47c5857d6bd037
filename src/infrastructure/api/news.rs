//! Hot-entry news via the RSS-to-JSON bridge

use serde::Deserialize;

use super::{degrade, ApiClient};
use crate::domain::entities::CapabilityResult;

/// Upper bound requested from the bridge; the feed usually holds ~30
const NEWS_COUNT: &str = "50";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    items: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    link: String,
}

impl ApiClient {
    pub(crate) async fn fetch_news(&self) -> CapabilityResult {
        let config = self.config();
        let params = [
            ("rss_url", config.features.news_rss_url.as_str()),
            ("api_key", config.credentials.rss2json_api_key.as_str()),
            ("count", NEWS_COUNT),
        ];

        let response = match self.get_json::<NewsResponse>(&config.endpoints.rss2json, &params).await {
            Ok(response) => response,
            Err(e) => return degrade("ニュース", e),
        };

        match self.choose(&response.items) {
            Some(item) => CapabilityResult::Success(format!(
                "ニュースのお届けだよー！ ガシーン ヽ(•̀ω•́ )ゝ\n{}",
                item.link
            )),
            None => CapabilityResult::Empty("ニュースが取得できませんでした。".to_string()),
        }
    }
}
