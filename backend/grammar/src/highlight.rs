use educheck_core::GrammarError;

/// One piece of the annotated text: either plain text or an error span with
/// its annotation attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub error: Option<&'a GrammarError>,
}

/// Map error offsets back onto the original text for display.
///
/// Errors are applied in position order. Spans that fall outside the text,
/// overlap an earlier span, or land off a char boundary are skipped — a bad
/// annotation never corrupts the rendered text. Concatenating the returned
/// segment texts always reproduces `text` exactly.
pub fn highlight<'a>(text: &'a str, errors: &'a [GrammarError]) -> Vec<Segment<'a>> {
    let mut ordered: Vec<&GrammarError> = errors.iter().collect();
    ordered.sort_by_key(|e| e.position);

    let mut segments = Vec::new();
    let mut cursor = 0;

    for error in ordered {
        let start = error.position;
        let end = start + error.length;
        if start < cursor
            || !error.in_bounds(text)
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            continue;
        }
        if start > cursor {
            segments.push(Segment {
                text: &text[cursor..start],
                error: None,
            });
        }
        segments.push(Segment {
            text: &text[start..end],
            error: Some(error),
        });
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(Segment {
            text: &text[cursor..],
            error: None,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use educheck_core::ErrorKind;

    fn error_at(position: usize, text: &str) -> GrammarError {
        GrammarError::new(
            position,
            text,
            vec!["fix".into()],
            ErrorKind::Spelling,
            "Imloviy xato",
        )
    }

    #[test]
    fn test_segments_reassemble_original_text() {
        let text = "Salomm, meni ismim Ahmad.";
        let errors = vec![error_at(0, "Salomm"), error_at(8, "meni ismim")];
        let segments = highlight(text, &errors);
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, text);
        assert_eq!(segments.iter().filter(|s| s.error.is_some()).count(), 2);
    }

    #[test]
    fn test_error_spans_carry_annotations() {
        let text = "Salomm dunyo";
        let errors = vec![error_at(0, "Salomm")];
        let segments = highlight(text, &errors);
        assert_eq!(segments[0].text, "Salomm");
        assert_eq!(segments[0].error.unwrap().correction, "fix");
        assert_eq!(segments[1].text, " dunyo");
        assert!(segments[1].error.is_none());
    }

    #[test]
    fn test_unsorted_errors_are_ordered() {
        let text = "bir ikki uch";
        let errors = vec![error_at(9, "uch"), error_at(0, "bir")];
        let segments = highlight(text, &errors);
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, text);
        assert_eq!(segments[0].text, "bir");
    }

    #[test]
    fn test_out_of_bounds_span_is_skipped() {
        let text = "qisqa";
        let errors = vec![error_at(3, "uzun so'z")];
        let segments = highlight(text, &errors);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].error.is_none());
        assert_eq!(segments[0].text, text);
    }

    #[test]
    fn test_overlapping_spans_keep_first() {
        let text = "salomlar";
        let errors = vec![error_at(0, "salom"), error_at(3, "omlar")];
        let segments = highlight(text, &errors);
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, text);
        assert_eq!(segments.iter().filter(|s| s.error.is_some()).count(), 1);
    }

    #[test]
    fn test_no_errors_single_segment() {
        let segments = highlight("toza matn", &[]);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].error.is_none());
    }

    #[test]
    fn test_non_char_boundary_span_is_skipped() {
        // "oʻz" — the modifier letter is multibyte; position 2 splits it.
        let text = "oʻz";
        let mut bad = error_at(2, "z");
        bad.length = 1;
        let segments = highlight(text, std::slice::from_ref(&bad));
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, text);
        assert!(segments.iter().all(|s| s.error.is_none()));
    }
}
