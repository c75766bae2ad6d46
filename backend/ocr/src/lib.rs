//! OCR client for EduCheck.
//!
//! Posts image bytes to the remote text-detection endpoint, normalizes the
//! heterogeneous response into an [`educheck_core::ExtractedText`], and falls
//! back to a canned sample when the remote call does not succeed.

pub mod client;
pub mod fallback;
pub mod language;

pub use client::{DetectOutcome, VisionOcrClient, DEFAULT_OCR_TIMEOUT_SECS};
pub use fallback::fallback_sample;
pub use language::detect_language;
