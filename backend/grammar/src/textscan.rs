//! Small text-scanning helpers shared by the mock generator.

/// Whitespace-separated words with their byte offsets into the original text.
pub(crate) fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    text.split_whitespace()
        .map(|w| (w.as_ptr() as usize - text.as_ptr() as usize, w))
        .collect()
}

/// Whether `word` contains a run of `min_len` or more identical characters.
pub(crate) fn has_repeated_run(word: &str, min_len: usize) -> bool {
    longest_run(word) >= min_len
}

fn longest_run(word: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<char> = None;
    for c in word.chars() {
        if Some(c) == prev {
            current += 1;
        } else {
            current = 1;
            prev = Some(c);
        }
        longest = longest.max(current);
    }
    longest
}

/// Collapse every run of repeated characters down to a single occurrence.
pub(crate) fn collapse_repeats(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev: Option<char> = None;
    for c in word.chars() {
        if Some(c) != prev {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Sentence span (byte offsets) containing `position`, computed the way the
/// presentation layer expects: sentences are the non-empty chunks between
/// `.`, `!`, and `?` runs.
pub(crate) fn sentence_bounds(text: &str, position: usize) -> (usize, usize) {
    let mut search = 0;
    for sentence in text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
    {
        if let Some(rel) = text[search..].find(sentence) {
            let start = search + rel;
            let end = start + sentence.len();
            if position >= start && position <= end {
                return (start, end.min(text.len()));
            }
            search = end;
        }
    }
    (0, text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_with_offsets() {
        let words = words_with_offsets("Salom  dunyo\nbugun");
        assert_eq!(words, vec![(0, "Salom"), (7, "dunyo"), (13, "bugun")]);
    }

    #[test]
    fn test_words_with_offsets_multibyte() {
        let text = "boʻlsa ham";
        let words = words_with_offsets(text);
        assert_eq!(words[0].1, "boʻlsa");
        assert_eq!(&text[words[1].0..], "ham");
    }

    #[test]
    fn test_repeated_runs() {
        assert!(has_repeated_run("salommm", 3));
        assert!(!has_repeated_run("salomm", 3));
        assert!(has_repeated_run("salomm", 2));
        assert!(!has_repeated_run("salom", 2));
    }

    #[test]
    fn test_collapse_repeats() {
        assert_eq!(collapse_repeats("salommm"), "salom");
        assert_eq!(collapse_repeats("kitobb"), "kitob");
        assert_eq!(collapse_repeats("aaa"), "a");
        assert_eq!(collapse_repeats("abc"), "abc");
    }

    #[test]
    fn test_sentence_bounds() {
        let text = "Salom dunyo. Bugun yaxshi kun!";
        // "Salom dunyo" occupies [0, 12).
        assert_eq!(sentence_bounds(text, 3), (0, 11));
        // " Bugun yaxshi kun" follows the period.
        let (start, end) = sentence_bounds(text, 15);
        assert!(start >= 12);
        assert!(end <= text.len());
    }
}
