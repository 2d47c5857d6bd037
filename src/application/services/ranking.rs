//! Channel activity ranking
//!
//! Pages backwards through channel history, tallies messages per author
//! and renders the top five with their share of the sample.

use std::collections::HashMap;

use crate::application::errors::{ApiError, BotError};
use crate::domain::entities::{CapabilityResult, HistoryEntry, RankEntry};
use crate::domain::traits::{ChatGateway, RandomSource, MAX_HISTORY_PAGE};

const TOP_N: usize = 5;
const MEDALS: [&str; 3] = [":first_place: ", ":second_place: ", ":third_place: "];

pub struct RankingService {
    sample_size: usize,
    page_size: usize,
}

impl RankingService {
    pub fn new(sample_size: usize) -> Self {
        Self {
            sample_size,
            page_size: MAX_HISTORY_PAGE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_HISTORY_PAGE);
        self
    }

    /// Fetch up to `sample_size` recent messages, most recent first
    pub async fn collect(
        &self,
        gateway: &dyn ChatGateway,
        channel_id: &str,
    ) -> Result<Vec<HistoryEntry>, BotError> {
        let mut messages: Vec<HistoryEntry> = Vec::new();
        let mut before: Option<String> = None;
        let mut remaining = self.sample_size;

        while remaining > 0 {
            let limit = remaining.min(self.page_size);
            let page = gateway
                .fetch_history(channel_id, limit, before.as_deref())
                .await?;

            let Some(oldest) = page.last() else {
                break;
            };
            before = Some(oldest.id.clone());

            let fetched = page.len();
            messages.extend(page);
            remaining = remaining.saturating_sub(fetched);

            // A short page means the start of the channel was reached
            if fetched < limit {
                break;
            }
        }

        tracing::debug!("Collected {} messages from {}", messages.len(), channel_id);
        Ok(messages)
    }

    pub async fn rank(
        &self,
        gateway: &dyn ChatGateway,
        channel_id: &str,
        random: &dyn RandomSource,
    ) -> CapabilityResult {
        let messages = match self.collect(gateway, channel_id).await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!("History fetch failed for {}: {}", channel_id, e);
                return CapabilityResult::Failure(ApiError::Transport(e.to_string()));
            }
        };

        if messages.is_empty() {
            return CapabilityResult::Empty("集計できるメッセージがなかったよ……".to_string());
        }

        let ranking = tally(&messages);
        CapabilityResult::Success(format_ranking(
            &gateway.channel_label(channel_id),
            &ranking,
            messages.len(),
            random,
        ))
    }
}

/// Count messages per author, highest first; ties keep first-seen order
pub fn tally(messages: &[HistoryEntry]) -> Vec<RankEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<RankEntry> = Vec::new();

    for message in messages {
        let name = message.author_name.as_str();
        match index.get(name) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(name, entries.len());
                entries.push(RankEntry {
                    author: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

pub fn format_ranking(
    channel_label: &str,
    ranking: &[RankEntry],
    total: usize,
    random: &dyn RandomSource,
) -> String {
    let sample_comment = format!("最新{}件の結果だよ！", total);
    let comments = [
        "人生は有意義にね！",
        "楽しそうだね！",
        "目指すならトップだよね！",
        "ねえねえ、仕事は？",
        sample_comment.as_str(),
        "この人たちに話しかけよう！",
        "他にやることないんだね〜",
        "かわいいね！",
        "これが最強戦士……！",
    ];

    let mut message = format!(
        "ヒマな人ランキング in {} だよ！ {}\n",
        channel_label,
        random.pick(&comments)
    );

    for (i, entry) in ranking.iter().take(TOP_N).enumerate() {
        let medal = MEDALS.get(i).copied().unwrap_or("");
        message.push_str(&format!(
            "{}{}. {} ({}: {:.2}%)\n",
            medal,
            i + 1,
            entry.author,
            entry.count,
            entry.percentage(total)
        ));
    }

    message
}
