use serde::{Deserialize, Serialize};

/// The current stage of an analysis run.
///
/// `Failed` is terminal for the run but not for the pipeline: retry
/// re-enters `ExtractingText` with the retained input, cancel returns to
/// `Idle` after clearing the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    ExtractingText,
    CheckingGrammar,
    PreparingResults,
    Done,
    Failed(String),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

/// Snapshot published on the progress channel after every transition.
/// `percent` is cosmetic within a stage; stage boundaries are the real
/// signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    #[serde(flatten)]
    pub state: PipelineState,
    pub percent: u8,
}

impl ProgressUpdate {
    pub fn idle() -> Self {
        Self {
            state: PipelineState::Idle,
            percent: 0,
        }
    }
}
