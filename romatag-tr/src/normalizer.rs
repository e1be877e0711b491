//! Whitespace and punctuation cleanup of romanized titles

/// Marker removed in append-original mode; the appended original title
/// already carries it
pub const INSTRUMENTAL_MARKER: &str = "(Instrumental)";

/// Marks that attach to the preceding word
const CLOSING_MARKS: [char; 7] = ['.', '!', ',', ':', '”', ']', ')'];

/// Marks that attach to the following word
const OPENING_MARKS: [char; 3] = ['“', '(', '['];

/// Clean up a joined romanization
///
/// Collapses whitespace, tightens spacing around punctuation, strips
/// [`INSTRUMENTAL_MARKER`] when `append_original` is set, and trims. The
/// pass repeats until the text is stable, so the result is a fixed point.
/// If nothing is left, the input is returned unchanged.
pub fn normalize(text: &str, append_original: bool) -> String {
    let cleaned = clean(text, append_original);
    if cleaned.is_empty() {
        return text.to_string();
    }
    cleaned
}

/// Fixed point of the cleanup passes, without the empty-result fallback
///
/// Callers that hold a better fallback than `text` itself (the untouched
/// tag title) use this and substitute it when the result is empty.
pub fn clean(text: &str, append_original: bool) -> String {
    let mut current = text.to_string();
    loop {
        let next = clean_pass(&current, append_original);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One cleanup pass; output is never longer than input
fn clean_pass(text: &str, append_original: bool) -> String {
    let mut out = collapse_whitespace(text);

    for mark in CLOSING_MARKS {
        out = out.replace(&format!(" {}", mark), &mark.to_string());
    }
    for mark in OPENING_MARKS {
        out = out.replace(&format!("{} ", mark), &mark.to_string());
    }

    if append_original {
        out = out.replace(INSTRUMENTAL_MARKER, "");
    }

    out.trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Sen   To\tChihiro \n", false), "Sen To Chihiro");
    }

    #[test]
    fn test_closing_marks_attach_left() {
        assert_eq!(normalize("Hai ! Sou , Desu .", false), "Hai! Sou, Desu.");
        assert_eq!(normalize("Title : Sub", false), "Title: Sub");
        assert_eq!(normalize("“ Kotoba ”", false), "“Kotoba”");
        assert_eq!(normalize("( Sakura )", false), "(Sakura)");
        assert_eq!(normalize("[ Live ]", false), "[Live]");
    }

    #[test]
    fn test_instrumental_marker_only_stripped_in_append_mode() {
        assert_eq!(
            normalize("Yoru Ni Kakeru (Instrumental)", false),
            "Yoru Ni Kakeru (Instrumental)"
        );
        assert_eq!(normalize("Yoru Ni Kakeru (Instrumental)", true), "Yoru Ni Kakeru");
    }

    #[test]
    fn test_stripping_marker_mid_title_leaves_single_space() {
        assert_eq!(normalize("Foo (Instrumental) Bar", true), "Foo Bar");
    }

    #[test]
    fn test_empty_result_falls_back_to_input() {
        assert_eq!(normalize("(Instrumental)", true), "(Instrumental)");
        assert_eq!(normalize("   ", false), "   ");
        assert_eq!(normalize("", false), "");
    }

    #[test]
    fn test_clean_can_be_empty() {
        assert_eq!(clean(" (Instrumental) ", true), "");
        assert_eq!(clean(" \u{3000} ", false), "");
        assert_eq!(clean("( Sakura )", false), "(Sakura)");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "  a  ( b ) , c  ",
            "(( x",
            "Foo (Instrumental) ( Instrumental) .",
            "( (Instrumental) )",
            "“ ” ! ,",
            "\u{3000}全角\u{3000}スペース",
        ];
        for input in inputs {
            for append in [false, true] {
                let once = normalize(input, append);
                assert_eq!(normalize(&once, append), once, "input {:?}", input);
            }
        }
    }

    #[test]
    fn test_never_empty_for_non_empty_input() {
        for input in [" ", "(Instrumental)", " (Instrumental) ", "x"] {
            assert!(!normalize(input, true).is_empty(), "input {:?}", input);
        }
    }
}
