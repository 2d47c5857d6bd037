//! External data providers
//!
//! Every provider goes through the same three steps: build a query from
//! named parameters (empty values are dropped), perform one GET with the
//! configured timeout, and map the decoded payload into a
//! `CapabilityResult`. Nothing in here returns a raw error to the caller.

pub mod weather;
pub mod news;
pub mod gourmet;
pub mod image;
pub mod video;
pub mod translate;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::{ApiError, BotError};
use crate::domain::entities::{CapabilityResult, Language};
use crate::domain::traits::{Capabilities, RandomSource};
use crate::infrastructure::config::Config;

/// HTTP client shared by every provider adapter
pub struct ApiClient {
    client: Client,
    config: Arc<Config>,
    random: Arc<dyn RandomSource>,
}

impl ApiClient {
    pub fn new(config: Arc<Config>, random: Arc<dyn RandomSource>) -> Result<Self, BotError> {
        let client = Client::builder()
            .user_agent(concat!("kizuna-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.features.request_timeout_secs))
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config,
            random,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Uniformly choose one element
    fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.random.below(items.len()))
        }
    }

    /// GET `url` and return the raw body
    async fn get_body(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, ApiError> {
        let query = build_query(params);
        tracing::debug!("GET {} ({} params)", url, query.len());

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(body.to_vec())
    }

    /// GET `url` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let body = self.get_body(url, params).await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Drop every parameter whose value is empty
pub fn build_query<'a>(params: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .copied()
        .collect()
}

/// Turn a provider error into the user-facing outcome.
///
/// Rejected credentials read as maintenance rather than a hard failure.
pub fn degrade(service: &str, error: ApiError) -> CapabilityResult {
    if error.is_credential() {
        tracing::warn!("{} credentials rejected: {}", service, error);
        return CapabilityResult::Empty(format!(
            "申し訳ありません。{}機能は現在メンテナンス中です。しばらく時間をおいてからお試しください。",
            service
        ));
    }
    tracing::warn!("{} request failed: {}", service, error);
    CapabilityResult::Failure(error)
}

/// Search queries accept both ASCII and Japanese commas as separators
pub fn normalize_separators(text: &str) -> String {
    text.replace([',', '、'], " ")
}

#[async_trait]
impl Capabilities for ApiClient {
    async fn weather(&self) -> CapabilityResult {
        self.fetch_weather().await
    }

    async fn news(&self) -> CapabilityResult {
        self.fetch_news().await
    }

    async fn gourmet(&self, area: &str, keyword: &str) -> CapabilityResult {
        self.search_gourmet(area, keyword).await
    }

    async fn image(&self, query: &str) -> CapabilityResult {
        self.search_image(query).await
    }

    async fn video(&self, query: &str) -> CapabilityResult {
        self.search_video(query).await
    }

    async fn channel_video(&self, channel_id: &str) -> CapabilityResult {
        self.latest_channel_video(channel_id).await
    }

    async fn translate(&self, text: &str, target: Language) -> CapabilityResult {
        self.translate_text(text, target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_drops_empty_values() {
        let query = build_query(&[("key", "abc"), ("keyword", ""), ("count", "100")]);
        assert_eq!(query, vec![("key", "abc"), ("count", "100")]);
    }

    #[test]
    fn test_degrade_credential_is_empty() {
        let result = degrade("翻訳", ApiError::Credential(403));
        match result {
            CapabilityResult::Empty(text) => assert!(text.contains("翻訳機能は現在メンテナンス中")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_degrade_other_errors_fail() {
        assert!(degrade("天気", ApiError::Status(500)).is_failure());
        assert!(degrade("天気", ApiError::Decode("bad".into())).is_failure());
        assert!(degrade("天気", ApiError::Transport("timeout".into())).is_failure());
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators("焼肉,個室、食べ放題"), "焼肉 個室 食べ放題");
    }
}
