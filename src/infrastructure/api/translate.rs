//! Translation through the Apps Script endpoint
//!
//! The endpoint answers with the translated text as a plain body.

use super::{degrade, ApiClient};
use crate::domain::entities::{CapabilityResult, Language};

impl ApiClient {
    pub(crate) async fn translate_text(&self, text: &str, target: Language) -> CapabilityResult {
        let text = text.trim();
        if text.is_empty() {
            return CapabilityResult::Empty("翻訳するテキストを入力してね！".to_string());
        }

        let config = self.config();
        let params = [("text", text), ("target", target.code())];
        let body = match self.get_body(&config.endpoints.translate, &params).await {
            Ok(body) => body,
            Err(e) => return degrade("翻訳", e),
        };

        format_translation(&String::from_utf8_lossy(&body))
    }
}

pub(crate) fn format_translation(translated: &str) -> CapabilityResult {
    let translated = translated.trim();
    if translated.is_empty() {
        return CapabilityResult::Empty(
            "翻訳に失敗しました。テキストが翻訳できない形式の可能性があります。".to_string(),
        );
    }

    CapabilityResult::Success(format!(
        "翻訳してみたよ！\n「{}」 これでどうかな？ σ(．_．@)",
        translated
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_translation() {
        assert_eq!(
            format_translation("Hello\n"),
            CapabilityResult::Success("翻訳してみたよ！\n「Hello」 これでどうかな？ σ(．_．@)".to_string())
        );
        assert!(format_translation("  ").is_empty());
    }
}
