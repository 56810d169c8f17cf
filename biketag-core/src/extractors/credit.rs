//! Credit extraction
//!
//! A credit is the name after `by` following a tag or proof marker, or the
//! name in `credit goes to: <name> for`. Captures stop at `{`, `[`, `]` and
//! line breaks, and a leading `/u/`, `u/` or `@` is stripped.

text_pattern!(
    CREDIT_PATTERN,
    r"(?i)((?:\[.*)?(?:proof\s*(?:found\s*at\s*)?(?:\(.*\))?\s*by\s*)(.*)(?:\])?)|((?:\[.*)?(?:tag\s*(?:\((?:hint:)?.*\))?\s*by\s*)(.*)(?:\])?)|((?:credit goes to:\s*)(.*)(?:\s*for))"
);

/// First surviving credit candidate, normalized
///
/// The whole match and every capture are candidates; those that are
/// themselves markers (`tag ...`, `proof ...`, `credit goes to`, `(hint:`)
/// or start with `by` are discarded.
pub fn parse_credit(text: &str) -> Option<String> {
    let pattern = CREDIT_PATTERN.as_ref()?;
    let captures = pattern.captures(text)?;

    captures
        .iter()
        .flatten()
        .map(|m| m.as_str())
        .filter(|candidate| is_credit_candidate(candidate))
        .filter_map(clean_credit)
        .next()
}

fn is_credit_candidate(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    !lower.is_empty()
        && !(lower.starts_with("tag") && lower.contains("tag "))
        && !(lower.starts_with("proof") && lower.contains("proof "))
        && !lower.starts_with("credit goes to")
        && !lower.contains("(hint:")
        && !lower.starts_with("by")
}

/// Trim a raw capture to the credited name
pub(crate) fn clean_credit(raw: &str) -> Option<String> {
    let end = raw
        .find(|c| matches!(c, '{' | '[' | ']' | '\r' | '\n'))
        .unwrap_or(raw.len());
    let name = normalize_credit(&raw[..end]);

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Strip whitespace and a leading `/u/`, `u/` or `@`
pub fn normalize_credit(name: &str) -> String {
    let name = name.trim();
    let name = name
        .strip_prefix("/u/")
        .or_else(|| name.strip_prefix("u/"))
        .or_else(|| name.strip_prefix('@'))
        .unwrap_or(name);
    name.trim().to_string()
}
