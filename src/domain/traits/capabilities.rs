use async_trait::async_trait;
use crate::domain::entities::{CapabilityResult, Language};

/// External data providers the router can call.
///
/// Implementations never return raw errors: every outcome is already
/// normalised into a `CapabilityResult`.
#[async_trait]
pub trait Capabilities: Send + Sync {
    async fn weather(&self) -> CapabilityResult;

    async fn news(&self) -> CapabilityResult;

    /// Restaurant search around `area` (empty means the default area)
    async fn gourmet(&self, area: &str, keyword: &str) -> CapabilityResult;

    async fn image(&self, query: &str) -> CapabilityResult;

    /// Recent video matching `query`, or any recent video when empty
    async fn video(&self, query: &str) -> CapabilityResult;

    /// Random recent upload from one fixed channel
    async fn channel_video(&self, channel_id: &str) -> CapabilityResult;

    async fn translate(&self, text: &str, target: Language) -> CapabilityResult;
}
