// Email Splitting Service
// Turns a pasted blob into discrete, ordered email units

use regex::Regex;
use std::sync::OnceLock;

/// Boundary between two emails: a blank-line gap (two or more newlines with
/// optional carriage returns) or any single line break. Both alternatives
/// delimit; blank lines simply never produce empty units.
fn boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\r?\n){2,}|\r?\n").unwrap())
}

/// Split raw pasted text into trimmed, non-empty email units.
///
/// Order follows input position and is preserved end-to-end through the
/// batch pipeline. Whitespace-only candidates are dropped; dropping is not
/// an error. Pure and stateless: same input, same output, every time.
pub fn split_emails(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return vec![];
    }

    boundary_re()
        .split(raw)
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_and_single_break_both_delimit() {
        assert_eq!(split_emails("a\n\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_only_input_yields_nothing() {
        assert_eq!(split_emails("   "), Vec::<String>::new());
        assert_eq!(split_emails(""), Vec::<String>::new());
        assert_eq!(split_emails("\n\n \n\t\n"), Vec::<String>::new());
    }

    #[test]
    fn test_units_are_trimmed() {
        let units = split_emails("  Hi team  \n\n   Second email\t");
        assert_eq!(units, vec!["Hi team", "Second email"]);
    }

    #[test]
    fn test_crlf_boundaries() {
        let units = split_emails("first\r\n\r\nsecond\r\nthird");
        assert_eq!(units, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_no_unit_is_empty_or_whitespace() {
        let messy = "one\n\n\n\ntwo\n   \nthree\n";
        for unit in split_emails(messy) {
            assert!(!unit.trim().is_empty());
        }
    }

    #[test]
    fn test_restartable() {
        let raw = "a\nb\n\nc";
        assert_eq!(split_emails(raw), split_emails(raw));
    }

    #[test]
    fn test_multi_line_paste_keeps_order() {
        let raw = "Refund please\n\nHow much is the pro plan?\n\nLove the app";
        let units = split_emails(raw);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0], "Refund please");
        assert_eq!(units[2], "Love the app");
    }
}
