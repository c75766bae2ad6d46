use once_cell::sync::Lazy;
use regex::Regex;

use educheck_core::Language;

static CYRILLIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[а-яё]").unwrap());
static LATIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[a-z]").unwrap());
static UZBEK_CYRILLIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[ўғқҳ]").unwrap());
static TURKISH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[çğıöşü]").unwrap());

/// Coarse script-based language guess over extracted text.
///
/// Checks are ordered: any Cyrillic wins as Russian, then plain Latin without
/// the Uzbek Cyrillic letters as English, then Turkish diacritics; anything
/// else defaults to Uzbek. Empty input is reported as unknown.
pub fn detect_language(text: &str) -> Language {
    if text.trim().is_empty() {
        return Language::Unknown;
    }
    if CYRILLIC.is_match(text) {
        Language::Russian
    } else if LATIN.is_match(text) && !UZBEK_CYRILLIC.is_match(text) {
        Language::English
    } else if TURKISH.is_match(text) {
        Language::Turkish
    } else {
        Language::Uzbek
    }
}
