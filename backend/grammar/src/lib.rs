//! Grammar checking for EduCheck.
//!
//! The remote grammar endpoint does the real analysis; this crate is the
//! request/response glue, the deterministic mock generator used when the
//! endpoint is unreachable, the scoring heuristic, and the offset-to-segment
//! highlighter consumed by the presentation layer.

pub mod client;
pub mod highlight;
pub mod mock;
pub mod score;
mod textscan;

pub use client::{TahrirchiClient, DEFAULT_GRAMMAR_TIMEOUT_SECS};
pub use highlight::{highlight, Segment};
pub use mock::generate_mock_errors;
pub use score::calculate_score;
