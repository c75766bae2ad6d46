use std::sync::Arc;

use tokio::sync::RwLock;

use educheck_core::{AnalysisResult, ExtractedText};

/// In-memory hand-off between the processing stage and the results stage.
///
/// Single-writer: one pipeline run at a time owns the write side, and every
/// run overwrites the previous run's artifacts wholesale. This replaces the
/// untyped key/value client storage the stages used to share.
#[derive(Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    extracted: Option<ExtractedText>,
    result: Option<AnalysisResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist the OCR stage's output for the results screen.
    pub async fn set_extracted(&self, extracted: ExtractedText) {
        self.inner.write().await.extracted = Some(extracted);
    }

    pub async fn extracted(&self) -> Option<ExtractedText> {
        self.inner.read().await.extracted.clone()
    }

    /// Persist the finished run, replacing whatever the previous run left.
    pub async fn set_result(&self, result: AnalysisResult) {
        self.inner.write().await.result = Some(result);
    }

    pub async fn result(&self) -> Option<AnalysisResult> {
        self.inner.read().await.result.clone()
    }

    /// Drop everything; used by cancel.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.extracted = None;
        inner.result = None;
    }
}
