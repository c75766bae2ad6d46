//! Log Redaction
//!
//! Scrubs bearer tokens and endpoint API keys from strings prior to logging.

use once_cell::sync::Lazy;
use regex::Regex;

static BEARER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
static KEY_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([?&](?:key|token|api_key)=)[^&\s]+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    KEY_PARAM_RE
        .replace_all(&redacted, "$1[REDACTED_TOKEN]")
        .to_string()
}
