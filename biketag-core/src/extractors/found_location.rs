//! Found-location extraction

text_pattern!(
    FOUND_LOCATION_PATTERN,
    r"(?i)(?:found at \()(.+?)(?:\))|(?:\[(?:\s*bike\s*)(?:\s*tag\s*))#?(\d+)(?:(?:\])|(?:\s*.\s*(.*)\]))"
);

/// Where the previous tag was found
///
/// Either the text inside `found at (...)` or the free text after the number
/// in a bracketed label such as `[Bike Tag 31 - Stone Arch Bridge]`.
pub fn parse_found_location(text: &str) -> Option<String> {
    let pattern = FOUND_LOCATION_PATTERN.as_ref()?;
    let captures = pattern.captures(text)?;

    let location = captures.get(1).or_else(|| captures.get(3))?.as_str().trim();
    if location.is_empty() {
        None
    } else {
        Some(location.to_string())
    }
}
