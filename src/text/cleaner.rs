//! OCR/translation text normalisation.
//!
//! [`clean`] is a pure function: deterministic, side-effect free, and
//! idempotent (`clean(clean(s)) == clean(s)`).  It runs on raw OCR output
//! before translation and again on the translated text before layout.

/// Normalise raw OCR or translation output into a single logical paragraph.
///
/// * Rejoins hyphenated line breaks (`"exam-\nple"` → `"example"`), which
///   OCR engines produce when the source text wrapped mid-word.
/// * Collapses every run of whitespace (spaces, tabs, newlines) into one
///   space.
/// * Trims leading and trailing whitespace.
///
/// # Examples
///
/// ```
/// use screen_translate::text::clean;
///
/// assert_eq!(clean("Line1\n\n  Line2   "), "Line1 Line2");
/// assert_eq!(clean("exam-\nple"), "example");
/// ```
pub fn clean(text: &str) -> String {
    let joined = rejoin_hyphenated(text);
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop hyphen + line-break sequences that split a word across lines.
///
/// Must run before whitespace collapsing, while the newline information is
/// still present.  A hyphen is only dropped when the following whitespace run
/// contains a newline and the next fragment starts with an alphanumeric
/// character; "foo - bar" and trailing hyphens are left untouched.
fn rejoin_hyphenated(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '-' {
            out.push(c);
            continue;
        }

        let mut run = String::new();
        let mut has_newline = false;
        while let Some(&next) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            has_newline |= next == '\n' || next == '\r';
            run.push(next);
            chars.next();
        }

        if has_newline && chars.peek().is_some_and(|n| n.is_alphanumeric()) {
            // Hyphenated line break: drop both the hyphen and the break.
            continue;
        }
        out.push(c);
        out.push_str(&run);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(clean("Line1\n\n  Line2   "), "Line1 Line2");
        assert_eq!(clean("  a\tb\r\nc "), "a b c");
    }

    #[test]
    fn rejoins_hyphenated_line_breaks() {
        assert_eq!(clean("exam-\nple"), "example");
        assert_eq!(clean("multi-\n  line hy-\nphens"), "multiline hyphens");
    }

    #[test]
    fn keeps_hyphens_without_line_breaks() {
        assert_eq!(clean("well-known term"), "well-known term");
        assert_eq!(clean("foo - bar"), "foo - bar");
    }

    #[test]
    fn keeps_trailing_hyphen() {
        assert_eq!(clean("dangling-\n"), "dangling-");
        assert_eq!(clean("dash- "), "dash-");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "",
            "plain",
            "Line1\n\n  Line2   ",
            "exam-\nple",
            "a  b\tc\nd",
            "  \n \t ",
            "well-known term",
            "Merhaba Dünya",
        ];
        for s in inputs {
            let once = clean(s);
            assert_eq!(clean(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn empty_and_whitespace_only_become_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\t  "), "");
    }
}
