use async_trait::async_trait;

use crate::types::{ExtractedText, GrammarOutcome, Language};

/// Trait for OCR providers used by the pipeline.
///
/// Implementations never report failure to the caller: when the remote call
/// does not succeed or returns no usable text, they return a best-effort
/// result with `fallback = true` instead.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Provider name (e.g., "vision").
    fn name(&self) -> &str;

    /// Extract text from raw image bytes.
    async fn recognize(&self, image: &[u8]) -> ExtractedText;
}

/// Trait for grammar checkers used by the pipeline.
///
/// Same contract as [`TextRecognizer`]: the call always resolves, with a
/// failed remote check surfacing as a mock-sourced outcome.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Provider name (e.g., "tahrirchi").
    fn name(&self) -> &str;

    /// Check `text` and return the typed error list.
    async fn check(&self, text: &str, language: Language) -> GrammarOutcome;
}
