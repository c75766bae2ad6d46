use educheck_core::GrammarError;

/// Derive a 0–10 quality score from word count and weighted error counts.
///
/// Error-free texts score on a fixed step function of word count; otherwise
/// the score starts from 9.5, drops with the weighted error ratio, gets
/// capped for very short texts and high ratios, and is clamped to
/// `[2.0, 10.0]`. Rounded to one decimal.
pub fn calculate_score(text: &str, errors: &[GrammarError]) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let word_count = text.split_whitespace().count();

    if errors.is_empty() {
        return match word_count {
            0..=2 => 7.5,
            3..=7 => 8.5,
            _ => 9.2,
        };
    }

    let weighted: f64 = errors.iter().map(|e| e.kind.weight()).sum();
    let ratio = weighted / word_count.max(1) as f64;

    let mut score = 9.5 - ratio * 6.0;
    if word_count < 3 {
        score = score.min(6.5);
    }
    if ratio >= 0.4 {
        score = score.min(5.0);
    } else if ratio >= 0.2 {
        score = score.min(7.0);
    }

    (score.clamp(2.0, 10.0) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use educheck_core::ErrorKind;

    fn error(kind: ErrorKind) -> GrammarError {
        GrammarError::new(0, "so'z", vec!["soz".into()], kind, kind.description())
    }

    fn words(n: usize) -> String {
        vec!["so'z"; n].join(" ")
    }

    #[test]
    fn test_no_error_buckets() {
        assert_eq!(calculate_score(&words(2), &[]), 7.5);
        assert_eq!(calculate_score(&words(5), &[]), 8.5);
        assert_eq!(calculate_score(&words(10), &[]), 9.2);
    }

    #[test]
    fn test_no_error_score_monotonic_in_word_count() {
        let mut last = 0.0;
        for n in [1, 2, 3, 7, 8, 20] {
            let score = calculate_score(&words(n), &[]);
            assert!(score >= last, "score dropped at {} words", n);
            last = score;
        }
    }

    #[test]
    fn test_two_spelling_errors_capped_at_seven() {
        // 10 words, weighted 2.0, ratio exactly 0.2.
        let errors = vec![error(ErrorKind::Spelling), error(ErrorKind::Spelling)];
        let score = calculate_score(&words(10), &errors);
        assert!(score <= 7.0);
        assert_eq!(score, 7.0);
    }

    #[test]
    fn test_five_grammar_errors_capped_at_five() {
        // 10 words, weighted 7.5, ratio 0.75.
        let errors = vec![error(ErrorKind::Grammar); 5];
        let score = calculate_score(&words(10), &errors);
        assert!(score <= 5.0);
        assert!(score >= 2.0);
    }

    #[test]
    fn test_monotonic_in_error_count() {
        let text = words(10);
        let mut last = 11.0;
        for n in 0..8 {
            let errors = vec![error(ErrorKind::Spelling); n];
            let score = calculate_score(&text, &errors);
            assert!(score <= last, "score rose at {} errors", n);
            last = score;
        }
    }

    #[test]
    fn test_short_text_cap() {
        let errors = vec![error(ErrorKind::Style)];
        let score = calculate_score(&words(2), &errors);
        assert!(score <= 6.5);
    }

    #[test]
    fn test_floor_is_two() {
        let errors = vec![error(ErrorKind::Grammar); 50];
        assert_eq!(calculate_score(&words(5), &errors), 2.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(calculate_score("", &[]), 0.0);
        assert_eq!(calculate_score("   ", &[]), 0.0);
    }

    #[test]
    fn test_style_errors_weigh_less_than_grammar() {
        let text = words(10);
        let style = calculate_score(&text, &vec![error(ErrorKind::Style); 2]);
        let grammar = calculate_score(&text, &vec![error(ErrorKind::Grammar); 2]);
        assert!(style > grammar);
    }
}
