use crate::application::errors::ApiError;

/// Normalised outcome of one external capability call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityResult {
    /// Display text ready to send
    Success(String),
    /// Well-formed answer with nothing usable; carries a friendly message
    Empty(String),
    Failure(ApiError),
}

impl CapabilityResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, CapabilityResult::Empty(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CapabilityResult::Failure(_))
    }

    /// Text to show the user, substituting `apology` on failure
    pub fn into_reply(self, apology: &str) -> String {
        match self {
            CapabilityResult::Success(text) | CapabilityResult::Empty(text) => text,
            CapabilityResult::Failure(e) => {
                tracing::warn!("Capability failed: {}", e);
                apology.to_string()
            }
        }
    }
}

/// Translation target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Japanese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
        }
    }

    /// Reply used when no 「…」 span is present
    pub fn quote_hint(&self) -> &'static str {
        match self {
            Language::English => "「」で囲ってくれると英語に翻訳するよ〜",
            Language::Japanese => "「」で囲ってくれると日本語に翻訳するよ〜",
        }
    }
}

/// Author tally used by the activity ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub author: String,
    pub count: usize,
}

impl RankEntry {
    /// Share of `total`, zero when nothing was counted
    pub fn percentage(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count as f64 / total as f64 * 100.0
    }
}
