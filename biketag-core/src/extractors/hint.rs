//! Numeric hint extraction
//!
//! Only the digits directly between `hint:` and the closing `)` count, so
//! free-text hints such as `(hint: blue door)` produce nothing here. The
//! delimiter parser in `templates` handles free-text hints.

text_pattern!(HINT_PATTERN, r"(?i)hint:\s*(\d*)\s*\)");

/// Numbers attached to `hint:` markers
///
/// `None` when no marker matches. Markers without digits leave the list
/// empty; repeated numbers are kept once, in first-occurrence order.
pub fn parse_hints(text: &str) -> Option<Vec<u32>> {
    let pattern = HINT_PATTERN.as_ref()?;

    let mut matched = false;
    let mut hints = Vec::new();
    for captures in pattern.captures_iter(text) {
        matched = true;
        let Some(number) = captures
            .get(1)
            .and_then(|digits| digits.as_str().parse::<u32>().ok())
        else {
            continue;
        };
        if !hints.contains(&number) {
            hints.push(number);
        }
    }

    matched.then_some(hints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_hint() {
        assert_eq!(parse_hints("#3 tag (hint: 42) by u/amy"), Some(vec![42]));
        assert_eq!(parse_hints("(HINT:7) and (hint: 7) and (hint:8)"), Some(vec![7, 8]));
    }

    #[test]
    fn test_marker_without_digits() {
        assert_eq!(parse_hints("(hint:)"), Some(vec![]));
    }

    #[test]
    fn test_free_text_hint_is_not_numeric() {
        assert_eq!(parse_hints("#5 tag (hint: blue door) by u/bob"), None);
        assert_eq!(parse_hints(""), None);
    }
}
