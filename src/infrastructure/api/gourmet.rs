//! Restaurant search (HotPepper gourmet API)

use serde::Deserialize;

use super::{degrade, normalize_separators, ApiClient};
use crate::domain::entities::CapabilityResult;

#[derive(Debug, Deserialize)]
struct GourmetResponse {
    results: GourmetResults,
}

#[derive(Debug, Default, Deserialize)]
struct GourmetResults {
    #[serde(default)]
    shop: Vec<Shop>,
}

#[derive(Debug, Deserialize)]
struct Shop {
    name: String,
    #[serde(default)]
    mobile_access: String,
    urls: ShopUrls,
}

#[derive(Debug, Deserialize)]
struct ShopUrls {
    pc: String,
}

impl ApiClient {
    pub(crate) async fn search_gourmet(&self, area: &str, keyword: &str) -> CapabilityResult {
        let config = self.config();
        let area = if area.is_empty() {
            config.features.gourmet_default_area.as_str()
        } else {
            area
        };
        let keyword = normalize_separators(keyword);

        let params = [
            ("key", config.credentials.recruit_api_key.as_str()),
            ("address", area),
            ("keyword", keyword.trim()),
            ("count", "100"),
            ("format", "json"),
        ];

        let response = match self.get_json::<GourmetResponse>(&config.endpoints.hotpepper, &params).await {
            Ok(response) => response,
            Err(e) => return degrade("グルメ検索", e),
        };

        match self.choose(&response.results.shop) {
            Some(shop) => CapabilityResult::Success(format!(
                "{}で探してみたよ！ こことかどうかなー！\n{} 『{}』\n{}",
                area, shop.mobile_access, shop.name, shop.urls.pc
            )),
            None => CapabilityResult::Empty("ごめんね、お店見つけられなかったよ……".to_string()),
        }
    }
}
