use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confidence reported for a successful OCR call. The remote service does not
/// measure confidence, so this is a constant stand-in.
pub const OCR_CONFIDENCE_REMOTE: f64 = 0.95;

/// Confidence reported when OCR fell back to a canned sample.
pub const OCR_CONFIDENCE_FALLBACK: f64 = 0.75;

/// Coarse language tag detected from the extracted text's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Uzbek,
    Russian,
    English,
    Turkish,
    Unknown,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Uzbek => "uzbek",
            Language::Russian => "russian",
            Language::English => "english",
            Language::Turkish => "turkish",
            Language::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Classification of a surfaced grammar error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Spelling,
    Grammar,
    Style,
}

impl ErrorKind {
    /// Map the remote service's numeric type code onto a kind.
    /// Code 1 is an orthography error, 30 a grammar error; everything
    /// else is reported as a style suggestion.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ErrorKind::Spelling,
            30 => ErrorKind::Grammar,
            _ => ErrorKind::Style,
        }
    }

    /// Weight used by the scorer.
    pub fn weight(self) -> f64 {
        match self {
            ErrorKind::Spelling => 1.0,
            ErrorKind::Grammar => 1.5,
            ErrorKind::Style => 0.5,
        }
    }

    /// Localized human-readable label for the kind.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::Spelling => "Imloviy xato",
            ErrorKind::Grammar => "Grammatik xato",
            ErrorKind::Style => "Matn xatosi",
        }
    }
}

/// Text produced by the OCR stage. Immutable once produced; a new upload
/// replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub confidence: f64,
    pub language: Language,
    pub fallback: bool,
}

impl ExtractedText {
    pub fn remote(text: String, language: Language) -> Self {
        Self {
            text,
            confidence: OCR_CONFIDENCE_REMOTE,
            language,
            fallback: false,
        }
    }

    pub fn fallback(text: String) -> Self {
        Self {
            text,
            confidence: OCR_CONFIDENCE_FALLBACK,
            language: Language::Uzbek,
            fallback: true,
        }
    }
}

/// A single error annotation against the extracted text.
///
/// `position` and `length` are byte offsets into the source text, and
/// `position + length <= source.len()` always holds for errors produced by
/// this crate's consumers. `corrections` is never empty for a surfaced
/// error, and `correction` is always `corrections[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarError {
    pub position: usize,
    pub length: usize,
    pub text: String,
    pub corrections: Vec<String>,
    pub correction: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub description: String,
    pub sentence_start: usize,
    pub sentence_end: usize,
}

impl GrammarError {
    /// Build an error from a matched span plus its candidate corrections.
    /// The primary correction is the first candidate.
    pub fn new(
        position: usize,
        text: impl Into<String>,
        corrections: Vec<String>,
        kind: ErrorKind,
        description: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let correction = corrections.first().cloned().unwrap_or_default();
        Self {
            position,
            length: text.len(),
            text,
            corrections,
            correction,
            kind,
            description: description.into(),
            sentence_start: 0,
            sentence_end: 0,
        }
    }

    pub fn with_sentence(mut self, start: usize, end: usize) -> Self {
        self.sentence_start = start;
        self.sentence_end = end;
        self
    }

    /// Whether the annotation's span fits inside `source`.
    pub fn in_bounds(&self, source: &str) -> bool {
        self.position
            .checked_add(self.length)
            .map(|end| end <= source.len())
            .unwrap_or(false)
    }
}

/// Where a grammar result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarSource {
    /// Short-circuited by input validation, no network call made.
    Validation,
    /// Parsed from the remote grammar endpoint.
    Remote,
    /// Synthesized by the mock generator after the remote call failed.
    Mock,
}

impl fmt::Display for GrammarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrammarSource::Validation => "validation",
            GrammarSource::Remote => "tahrirchi.uz",
            GrammarSource::Mock => "mock",
        };
        write!(f, "{}", name)
    }
}

/// Result of a grammar check. The checker never fails to its caller; a
/// failed remote call shows up here as `source: Mock, fallback: true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarOutcome {
    pub errors: Vec<GrammarError>,
    pub source: GrammarSource,
    pub fallback: bool,
}

impl GrammarOutcome {
    pub fn validation() -> Self {
        Self {
            errors: Vec::new(),
            source: GrammarSource::Validation,
            fallback: false,
        }
    }

    pub fn remote(errors: Vec<GrammarError>) -> Self {
        Self {
            errors,
            source: GrammarSource::Remote,
            fallback: false,
        }
    }

    pub fn mock(errors: Vec<GrammarError>) -> Self {
        Self {
            errors,
            source: GrammarSource::Mock,
            fallback: true,
        }
    }
}

/// Aggregate hand-off artifact between the processing stage and the results
/// stage. Created once per completed pipeline run, overwritten by the next
/// run, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub run_id: Uuid,
    pub score: f64,
    pub errors: Vec<GrammarError>,
    pub confidence: f64,
    pub language: Language,
    pub fallback: bool,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_from_code() {
        assert_eq!(ErrorKind::from_code(1), ErrorKind::Spelling);
        assert_eq!(ErrorKind::from_code(30), ErrorKind::Grammar);
        assert_eq!(ErrorKind::from_code(0), ErrorKind::Style);
        assert_eq!(ErrorKind::from_code(7), ErrorKind::Style);
    }

    #[test]
    fn test_error_kind_weights() {
        assert_eq!(ErrorKind::Spelling.weight(), 1.0);
        assert_eq!(ErrorKind::Grammar.weight(), 1.5);
        assert_eq!(ErrorKind::Style.weight(), 0.5);
    }

    #[test]
    fn test_grammar_error_primary_correction() {
        let err = GrammarError::new(
            0,
            "salomm",
            vec!["salom".into(), "salomlar".into()],
            ErrorKind::Spelling,
            "Imloviy xato",
        );
        assert_eq!(err.correction, "salom");
        assert_eq!(err.correction, err.corrections[0]);
        assert_eq!(err.length, "salomm".len());
    }

    #[test]
    fn test_grammar_error_bounds() {
        let err = GrammarError::new(
            4,
            "word",
            vec!["fix".into()],
            ErrorKind::Spelling,
            "Imloviy xato",
        );
        assert!(err.in_bounds("abcdword"));
        assert!(!err.in_bounds("abc"));
    }

    #[test]
    fn test_language_serde_round_trip() {
        let json = serde_json::to_string(&Language::Russian).unwrap();
        assert_eq!(json, "\"russian\"");
        let parsed: Language = serde_json::from_str("\"uzbek\"").unwrap();
        assert_eq!(parsed, Language::Uzbek);
    }

    #[test]
    fn test_extracted_text_constructors() {
        let ok = ExtractedText::remote("matn".into(), Language::Uzbek);
        assert_eq!(ok.confidence, OCR_CONFIDENCE_REMOTE);
        assert!(!ok.fallback);

        let fb = ExtractedText::fallback("matn".into());
        assert_eq!(fb.confidence, OCR_CONFIDENCE_FALLBACK);
        assert!(fb.fallback);
        assert_eq!(fb.language, Language::Uzbek);
    }

    #[test]
    fn test_analysis_result_serialization() {
        let result = AnalysisResult {
            run_id: Uuid::new_v4(),
            score: 8.5,
            errors: vec![],
            confidence: 0.95,
            language: Language::Uzbek,
            fallback: false,
            completed_at: Utc::now(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.score, 8.5);
        assert_eq!(parsed.language, Language::Uzbek);
    }
}
