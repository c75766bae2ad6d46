//! Deterministic mock error generator.
//!
//! Used purely as a fallback when the remote grammar endpoint is
//! unreachable, so the caller always has something to render. Output is
//! tagged [`GrammarSource::Mock`] by the client and must never be confused
//! with real analysis. Given the same input the generator always produces
//! the same error list.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use educheck_core::{ErrorKind, GrammarError};

use crate::textscan::{collapse_repeats, has_repeated_run, sentence_bounds, words_with_offsets};

/// How a rule locates its matches.
enum Matcher {
    Pattern(Regex),
    /// A standalone word made of one character repeated three or more times.
    /// The original rule was a backreference pattern, which the regex crate
    /// does not support, so this is a character scan.
    RepeatedRun,
}

/// How a rule derives its correction candidates from a match.
enum Corrections {
    Fixed(&'static [&'static str]),
    /// Conjunction followed by a comma: offer the match without the comma.
    DropComma,
    /// Doubled sentence punctuation: offer a single period.
    SinglePeriod,
    /// Repeated-letter run: offer the run collapsed to one character.
    Collapse,
}

struct Rule {
    matcher: Matcher,
    corrections: Corrections,
    kind: ErrorKind,
    description: &'static str,
}

fn pattern(
    re: &str,
    corrections: Corrections,
    kind: ErrorKind,
    description: &'static str,
) -> Rule {
    Rule {
        matcher: Matcher::Pattern(Regex::new(re).expect("static mock pattern")),
        corrections,
        kind,
        description,
    }
}

/// Curated Uzbek typo/grammar patterns, checked in order. Earlier rules win
/// scarce slots under the error cap.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use Corrections::Fixed;
    use ErrorKind::{Grammar, Spelling, Style};
    vec![
        // Doubled trailing letters on common words.
        pattern(
            r"(?i)\b(salom+m+|salomm+|salommm+)\b",
            Fixed(&["salom", "salomlar", "salomim"]),
            Spelling,
            "Imloviy xato - ortiqcha harf",
        ),
        pattern(
            r"(?i)\b(alaykum+m+|assalom+|assalomm+)\b",
            Fixed(&["alaykum", "assalomu alaykum"]),
            Spelling,
            "Imloviy xato - noto'g'ri yozilish",
        ),
        pattern(
            r"(?i)\b(universitettt+|universitett+|universitt+)\b",
            Fixed(&["universitet"]),
            Spelling,
            "Imloviy xato - ortiqcha harf",
        ),
        pattern(
            r"(?i)\b(maktabb+|maktabbb+)\b",
            Fixed(&["maktab"]),
            Spelling,
            "Imloviy xato - ortiqcha harf",
        ),
        pattern(
            r"(?i)\b(kitobb+|kitobbb+)\b",
            Fixed(&["kitob"]),
            Spelling,
            "Imloviy xato - ortiqcha harf",
        ),
        // Separated particles that should be glued to the stem.
        pattern(
            r"(?i)\bmeni\s+ismim\b",
            Fixed(&["mening ismim"]),
            Grammar,
            "Grammatik xato - egalik qo'shimchasi",
        ),
        pattern(
            r"(?i)\buniversitet\s+da\b",
            Fixed(&["universitetda"]),
            Grammar,
            "Grammatik xato - joy-payt qo'shimchasi",
        ),
        pattern(
            r"(?i)\bmaktab\s+ga\b",
            Fixed(&["maktabga"]),
            Grammar,
            "Grammatik xato - yo'nalish qo'shimchasi",
        ),
        pattern(
            r"(?i)\bkitob\s+ni\b",
            Fixed(&["kitobni"]),
            Grammar,
            "Grammatik xato - tushum qo'shimchasi",
        ),
        pattern(
            r"(?i)\buy\s+dan\b",
            Fixed(&["uydan"]),
            Grammar,
            "Grammatik xato - chiqish qo'shimchasi",
        ),
        pattern(
            r"(?i)\bdo'kon\s+ga\b",
            Fixed(&["do'konga"]),
            Grammar,
            "Grammatik xato - yo'nalish qo'shimchasi",
        ),
        pattern(
            r"(?i)\bmen\s+ning\b",
            Fixed(&["mening"]),
            Grammar,
            "Grammatik xato - egalik qo'shimchasi",
        ),
        pattern(
            r"(?i)\bsen\s+ning\b",
            Fixed(&["sening"]),
            Grammar,
            "Grammatik xato - egalik qo'shimchasi",
        ),
        // Style and punctuation.
        pattern(
            r"(?i)\b(va|yoki|lekin|ammo)\s*,",
            Corrections::DropComma,
            Style,
            "Uslub xatosi - ortiqcha vergul",
        ),
        pattern(
            r"[.!?]{2,}",
            Corrections::SinglePeriod,
            Style,
            "Uslub xatosi - ortiqcha tinish belgilari",
        ),
        Rule {
            matcher: Matcher::RepeatedRun,
            corrections: Corrections::Collapse,
            kind: Spelling,
            description: "Imloviy xato - takrorlangan harf",
        },
        pattern(
            r"(?i)\b(qilaman|qilyapman)\b",
            Fixed(&["qilaman", "qilyapman", "qilmoqchiman"]),
            Grammar,
            "Grammatik xato - fe'l shakli",
        ),
    ]
});

/// Common words frequently seen with a doubled-letter typo. Used by the
/// second tier when no pattern rule fires.
const COMMON_TYPO_STEMS: [&str; 6] = [
    "salom",
    "kitob",
    "maktab",
    "universitet",
    "yaxshi",
    "bugun",
];

/// Generate a deterministic, capped list of synthetic errors for `text`.
///
/// Tiers, first non-empty wins:
/// 1. the curated pattern table (capped at `min(10, max(2, words/8))`),
/// 2. known-typo word stems (up to 3),
/// 3. one collapsed-repeats error on the first suspicious word,
/// 4. one demonstrative missing-suffix error on the middle word.
pub fn generate_mock_errors(text: &str) -> Vec<GrammarError> {
    let words = words_with_offsets(text);
    let max_errors = (words.len() / 8).clamp(2, 10);

    let mut errors = pattern_tier(text, max_errors);

    if errors.is_empty() && words.len() > 2 {
        errors = known_typo_tier(text, &words);
    }

    if errors.is_empty() && looks_suspicious(text, &words) {
        errors = suspicious_word_tier(text, &words);
    }

    if errors.is_empty() && text.chars().count() > 10 && words.len() >= 2 {
        errors = middle_word_tier(text, &words);
    }

    debug!(count = errors.len(), cap = max_errors, "Generated mock errors");
    errors
}

fn pattern_tier(text: &str, max_errors: usize) -> Vec<GrammarError> {
    let mut errors = Vec::new();
    for rule in RULES.iter() {
        if errors.len() >= max_errors {
            break;
        }
        for (position, matched) in rule.matches(text) {
            if errors.len() >= max_errors {
                break;
            }
            let corrections = rule.corrections_for(&matched);
            if corrections.is_empty() {
                continue;
            }
            let (sentence_start, sentence_end) = sentence_bounds(text, position);
            errors.push(
                GrammarError::new(position, matched, corrections, rule.kind, rule.description)
                    .with_sentence(sentence_start, sentence_end),
            );
        }
    }
    errors
}

fn known_typo_tier(text: &str, words: &[(usize, &str)]) -> Vec<GrammarError> {
    let mut errors = Vec::new();
    for &(position, word) in words {
        if errors.len() >= 3 {
            break;
        }
        let lower = word.to_lowercase();
        if let Some(stem) = COMMON_TYPO_STEMS.iter().find(|s| lower.contains(**s)) {
            let (sentence_start, sentence_end) = clipped_window(text, position, word.len(), 20);
            errors.push(
                GrammarError::new(
                    position,
                    word,
                    vec![(*stem).to_string(), (*stem).to_string()],
                    ErrorKind::Spelling,
                    "Imloviy xato - noto'g'ri yozilish",
                )
                .with_sentence(sentence_start, sentence_end),
            );
        }
    }
    errors
}

fn suspicious_word_tier(text: &str, words: &[(usize, &str)]) -> Vec<GrammarError> {
    let Some(&(position, word)) = words.iter().find(|(_, w)| is_suspicious_word(w)) else {
        return Vec::new();
    };
    let collapsed = collapse_repeats(word);
    let (sentence_start, sentence_end) = clipped_window(text, position, word.len(), 10);
    vec![GrammarError::new(
        position,
        word,
        vec![collapsed, "to'g'ri so'z".to_string()],
        ErrorKind::Spelling,
        "Imloviy xato - takrorlangan harflar",
    )
    .with_sentence(sentence_start, sentence_end)]
}

fn middle_word_tier(text: &str, words: &[(usize, &str)]) -> Vec<GrammarError> {
    let (position, word) = words[words.len() / 2];
    if word.chars().count() <= 2 {
        return Vec::new();
    }
    let (sentence_start, sentence_end) = clipped_window(text, position, word.len(), 15);
    vec![GrammarError::new(
        position,
        word,
        vec![
            format!("{}ning", word),
            format!("{}ga", word),
            format!("{}da", word),
        ],
        ErrorKind::Grammar,
        "Grammatik xato - qo'shimcha kerak bo'lishi mumkin",
    )
    .with_sentence(sentence_start, sentence_end)]
}

fn looks_suspicious(text: &str, words: &[(usize, &str)]) -> bool {
    text.contains("mm")
        || text.contains("bb")
        || text.contains("tt")
        || has_repeated_run(text, 3)
        || words.iter().any(|(_, w)| w.chars().count() > 15)
        || words.len() < 3
}

fn is_suspicious_word(word: &str) -> bool {
    word.contains("mm")
        || word.contains("bb")
        || word.contains("tt")
        || has_repeated_run(word, 3)
        || word.chars().count() > 15
}

/// Demo sentence window around a synthesized error, snapped to char
/// boundaries so the span stays sliceable.
fn clipped_window(text: &str, position: usize, length: usize, pad: usize) -> (usize, usize) {
    let mut start = position.saturating_sub(pad);
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (position + length + pad).min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    (start, end)
}

impl Rule {
    fn matches(&self, text: &str) -> Vec<(usize, String)> {
        match &self.matcher {
            Matcher::Pattern(re) => re
                .find_iter(text)
                .map(|m| (m.start(), m.as_str().to_string()))
                .collect(),
            Matcher::RepeatedRun => words_with_offsets(text)
                .into_iter()
                .filter(|(_, w)| is_repeated_run_word(w))
                .map(|(pos, w)| (pos, w.to_string()))
                .collect(),
        }
    }

    fn corrections_for(&self, matched: &str) -> Vec<String> {
        match &self.corrections {
            Corrections::Fixed(options) => options.iter().map(|s| s.to_string()).collect(),
            Corrections::DropComma => vec![matched.replace(',', "")],
            Corrections::SinglePeriod => vec![".".to_string()],
            Corrections::Collapse => vec![collapse_repeats(matched)],
        }
    }
}

/// A word that is one alphabetic character repeated three or more times.
fn is_repeated_run_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_alphabetic() && word.chars().count() >= 3 && chars.all(|c| c == first)
}
