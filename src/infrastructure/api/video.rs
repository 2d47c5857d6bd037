//! Video search (YouTube Data API)

use serde::Deserialize;

use super::{degrade, ApiClient};
use crate::application::errors::ApiError;
use crate::domain::entities::CapabilityResult;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoId {
    video_id: Option<String>,
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

impl ApiClient {
    /// Random recent video for the given search parameters
    async fn random_video(&self, extra: &[(&str, &str)]) -> Result<Option<String>, ApiError> {
        let config = self.config();
        let url = format!("{}/search", config.endpoints.youtube_data.trim_end_matches('/'));

        let mut params = vec![
            ("key", config.credentials.youtube_data_api_key.as_str()),
            ("part", "id"),
            ("type", "video"),
            ("maxResults", "50"),
            ("order", "date"),
        ];
        params.extend_from_slice(extra);

        let response: SearchResponse = self.get_json(&url, &params).await?;
        let ids: Vec<&str> = response
            .items
            .iter()
            .filter_map(|item| item.id.video_id.as_deref())
            .filter(|id| !id.is_empty())
            .collect();

        Ok(self.choose(&ids).map(|id| watch_url(id)))
    }

    pub(crate) async fn search_video(&self, query: &str) -> CapabilityResult {
        let query = query.trim();
        match self.random_video(&[("regionCode", "JP"), ("q", query)]).await {
            Ok(Some(url)) => {
                let subject = if query.is_empty() {
                    "最近の".to_string()
                } else {
                    format!("『{}』の", query)
                };
                CapabilityResult::Success(format!(
                    "{}動画を探してきたよ！ ( ⁎ᵕᴗᵕ⁎ ) :heartbeat:\n{}",
                    subject, url
                ))
            }
            Ok(None) => CapabilityResult::Empty("いい動画が見つけられなかったよ、ごめんね".to_string()),
            Err(e) => degrade("動画検索", e),
        }
    }

    pub(crate) async fn latest_channel_video(&self, channel_id: &str) -> CapabilityResult {
        if channel_id.is_empty() {
            return CapabilityResult::Empty("チャンネルが指定されていないよ".to_string());
        }

        match self.random_video(&[("channelId", channel_id)]).await {
            Ok(Some(url)) => CapabilityResult::Success(url),
            Ok(None) => CapabilityResult::Empty("チャンネルから動画が見つからなかったよ".to_string()),
            Err(e) => degrade("動画検索", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("abc123"), "https://www.youtube.com/watch?v=abc123");
    }
}
