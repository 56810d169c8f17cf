//! Tag number extraction
//!
//! Recognized forms (case-insensitive):
//! - `#12`, `#12 tag`, `#12 proof`, `tag #12`, `bike tag #12`
//! - markdown link labels such as `[Bike Tag 12]` or `[bike tag #12 - Lake St]`

use crate::types::TaggedImage;

text_pattern!(
    TAG_NUMBER_PATTERN,
    r"(?i)((?:(?:bike\s*)?(?:\s*tag)?)#(\d+)(?:(?:\s*tag)?|(?:\s*proof)?))|(?:\[(?:\s*bike\s*)(?:\s*tag\s*))#?(\d+)(?:(?:\])|(?:\s*.\s*.*\]))"
);

text_pattern!(DIGITS_PATTERN, r"\d+");

/// Distinct tag numbers in order of first occurrence
///
/// Each marker contributes the first run of digits inside it. Numbers that do
/// not fit in `u32` are skipped.
pub fn parse_tag_numbers(text: &str) -> Vec<u32> {
    let (Some(markers), Some(digits)) = (TAG_NUMBER_PATTERN.as_ref(), DIGITS_PATTERN.as_ref())
    else {
        return Vec::new();
    };

    let mut numbers = Vec::new();
    for marker in markers.find_iter(text) {
        let Some(number) = digits
            .find(marker.as_str())
            .and_then(|d| d.as_str().parse::<u32>().ok())
        else {
            continue;
        };

        if !numbers.contains(&number) {
            numbers.push(number);
        }
    }
    numbers
}

/// First tag number in an album entry's description
pub fn tag_number_of(image: &TaggedImage) -> Option<u32> {
    parse_tag_numbers(&image.description).first().copied()
}
