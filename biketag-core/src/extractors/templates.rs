//! Tag and proof text templates
//!
//! Album entries carry their metadata in fixed layouts:
//!
//! | Entry         | Description                                   | Title                    |
//! |---------------|-----------------------------------------------|--------------------------|
//! | mystery tag   | `#<n> tag (hint: <hint>) by <credit>`         | `(<gps>) {<discussion>}` |
//! | proof         | `#<n> proof found at (<found at>) by <credit>`| `(<gps>)`                |
//!
//! Optional parts are left out entirely when empty. The `parse_*` functions
//! here split those layouts on their delimiters, which is stricter than the
//! free-form extractors and keeps free-text hints intact.

use super::credit::clean_credit;
use super::tag_numbers::parse_tag_numbers;

text_pattern!(BY_PATTERN, r"\bby\b");

// ============================================================================
// Rendering
// ============================================================================

/// `#<n> tag (hint: <hint>) by <credit>`
pub fn tag_description(tag_number: i64, hint: &str, credit: &str) -> String {
    if hint.is_empty() {
        format!("#{} tag by {}", tag_number, credit)
    } else {
        format!("#{} tag (hint: {}) by {}", tag_number, hint, credit)
    }
}

/// `(<gps>) {<discussion link>}`
pub fn tag_title(gps: &str, discussion_link: &str) -> String {
    if gps.is_empty() {
        format!("{{{}}}", discussion_link)
    } else {
        format!("({}) {{{}}}", gps, discussion_link)
    }
}

/// `#<n> proof found at (<found at>) by <credit>`
pub fn proof_description(proof_number: i64, found_at: &str, credit: &str) -> String {
    if found_at.is_empty() {
        format!("#{} proof by {}", proof_number, credit)
    } else {
        format!("#{} proof found at ({}) by {}", proof_number, found_at, credit)
    }
}

/// `(<gps>)`
pub fn proof_title(gps: &str) -> String {
    format!("({})", gps)
}

// ============================================================================
// Delimiter parsing
// ============================================================================

/// Fields carried by a tag description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTextFields {
    pub tag_numbers: Vec<u32>,
    pub hint: Option<String>,
    pub credit: Option<String>,
    pub discussion_link: Option<String>,
}

/// Split a tag description into its fields
pub fn parse_tag_text(text: &str) -> TagTextFields {
    TagTextFields {
        tag_numbers: parse_tag_numbers(text),
        hint: hint_phrase(text),
        credit: credit_after_by(text),
        discussion_link: discussion_link(text),
    }
}

/// `(gps, discussion link)` from a tag title
pub fn parse_tag_title(title: &str) -> (Option<String>, Option<String>) {
    (parenthesized(title), discussion_link(title))
}

/// Name after the last standalone `by`
pub fn credit_after_by(text: &str) -> Option<String> {
    let pattern = BY_PATTERN.as_ref()?;
    let last = pattern.find_iter(text).last()?;
    clean_credit(&text[last.end()..])
}

/// Text after `hint:` up to the last closing parenthesis
pub fn hint_phrase(text: &str) -> Option<String> {
    let (_, rest) = text.split_once("hint:")?;
    let end = rest.rfind(')')?;
    non_empty(&rest[..end])
}

/// Text between the first `{` and the next `}`
pub fn discussion_link(text: &str) -> Option<String> {
    let (_, rest) = text.split_once('{')?;
    let end = rest.find('}').unwrap_or(rest.len());
    non_empty(&rest[..end])
}

/// Text between the first `(` and the next `)`
pub fn parenthesized(text: &str) -> Option<String> {
    let (_, rest) = text.split_once('(')?;
    let end = rest.find(')')?;
    non_empty(&rest[..end])
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
