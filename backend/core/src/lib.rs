//! Core types, errors, and provider traits shared across the EduCheck
//! backend crates.

pub mod error;
pub mod traits;
pub mod types;

pub use error::EduCheckError;
pub use traits::{GrammarChecker, TextRecognizer};
pub use types::{
    AnalysisResult, ErrorKind, ExtractedText, GrammarError, GrammarOutcome, GrammarSource,
    Language,
};
