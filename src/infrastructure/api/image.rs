//! Image search (Google Custom Search)

use serde::Deserialize;

use super::{degrade, normalize_separators, ApiClient};
use crate::domain::entities::CapabilityResult;

#[derive(Debug, Deserialize)]
struct ImageSearchResponse {
    #[serde(default)]
    items: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
struct ImageItem {
    link: String,
}

impl ApiClient {
    pub(crate) async fn search_image(&self, query: &str) -> CapabilityResult {
        let query = normalize_separators(query);
        let query = query.trim();
        if query.is_empty() {
            return CapabilityResult::Empty(
                "検索ワードがないよ？ 『/image ねこ』みたいに書いてね！".to_string(),
            );
        }

        let config = self.config();
        let params = [
            ("key", config.credentials.custom_search_api_key.as_str()),
            ("cx", config.credentials.custom_search_engine_id.as_str()),
            ("q", query),
            ("hl", "ja"),
            ("searchType", "image"),
            ("num", "10"),
        ];

        let response = match self.get_json::<ImageSearchResponse>(&config.endpoints.custom_search, &params).await {
            Ok(response) => response,
            Err(e) => return degrade("画像検索", e),
        };

        match self.choose(&response.items) {
            Some(item) => CapabilityResult::Success(format!(
                "画像のお届けですよ〜 ヾﾉ｡ÒㅅÓ)ﾉｼ\n{}",
                item.link
            )),
            None => CapabilityResult::Empty("画像が見つからなかったよー".to_string()),
        }
    }
}
