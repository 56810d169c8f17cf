//! GPS coordinate extraction
//!
//! Accepts sexagesimal pairs (`44°58'40.1"N 93°15'54.0"W`) and signed decimal
//! pairs (`44.9778, -93.2650`). Backslashes are removed first since escaped
//! quotes are common in post bodies.

text_pattern!(
    GPS_PATTERN,
    r#"(([0-9]{1,2})[:|°]([0-9]{1,2})[:|'|′]?([0-9]{1,2}(?:\.[0-9]+){0,1})?["|″]([N|S]),?\s*([0-9]{1,3})[:|°]([0-9]{1,2})[:|'|′]?([0-9]{1,2}(?:\.[0-9]+){0,1})?["|″]([E|W]))|((-?\d+(\.\d+)?),\s*(-?\d+(\.\d+)?))"#
);

/// First coordinate pair, exactly as written
pub fn parse_gps(text: &str) -> Option<String> {
    let pattern = GPS_PATTERN.as_ref()?;
    let sanitized = text.replace('\\', "");
    pattern
        .find(&sanitized)
        .map(|coordinates| coordinates.as_str().to_string())
}
