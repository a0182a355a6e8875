pub mod language;
pub mod libre;
pub mod retry;

pub use language::{resolve_language_code, supported_languages};
pub use libre::LibreTranslateClient;
pub use retry::{ResponseClass, RetryEvent, RetryPolicy, RetryState};

use crate::error::Result;
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one text segment into `target_lang` (a service language code).
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// Translate `text`, falling back to the original when the translator gives up.
pub async fn translate_or_original(
    translator: &dyn Translator,
    text: &str,
    target_lang: &str,
) -> String {
    match translator.translate(text, target_lang).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!("Could not translate line, keeping original: {}", e);
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubkitError;

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str, _target_lang: &str) -> Result<String> {
            Err(SubkitError::RateLimited(3))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct UppercaseTranslator;

    #[async_trait]
    impl Translator for UppercaseTranslator {
        async fn translate(&self, text: &str, _target_lang: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }

        fn name(&self) -> &'static str {
            "uppercase"
        }
    }

    #[tokio::test]
    async fn test_translate_or_original_falls_back() {
        let text = translate_or_original(&FailingTranslator, "Hello there", "es").await;
        assert_eq!(text, "Hello there");
    }

    #[tokio::test]
    async fn test_translate_or_original_success() {
        let text = translate_or_original(&UppercaseTranslator, "hello", "es").await;
        assert_eq!(text, "HELLO");
    }
}
