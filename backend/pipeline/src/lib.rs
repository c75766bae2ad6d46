//! Orchestration pipeline for EduCheck.
//!
//! Sequences OCR → grammar check → scoring as a typed state machine, reports
//! progress over a watch channel, and hands the finished [`AnalysisResult`]
//! to the results stage through an in-memory store.

pub mod pipeline;
pub mod progress;
pub mod store;

pub use pipeline::{AnalysisInput, AnalysisPipeline};
pub use progress::{PipelineState, ProgressUpdate};
pub use store::ResultStore;

pub use educheck_core::AnalysisResult;
