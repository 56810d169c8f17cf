//! Tag position lookup
//!
//! In a well-formed album sorted by [`super::sort_by_tag_number`], the entries
//! for tag `N` sit near `len + 1 - (N - N % 2 + 1) * 2`. The predicted slot and
//! its two neighbours are checked first; a linear scan covers albums that do
//! not follow the layout.

use crate::types::TaggedImage;
use tracing::debug;

/// Index of the entry for `tag_number`
///
/// An entry matches when its description contains `#N tag` (or `#N proof`
/// with `is_proof`). Returns `None` when no entry matches.
pub fn locate(images: &[TaggedImage], tag_number: u32, is_proof: bool) -> Option<usize> {
    let marker = if is_proof {
        format!("#{} proof", tag_number)
    } else {
        format!("#{} tag", tag_number)
    };
    let verify = |index: i64| -> bool {
        usize::try_from(index)
            .ok()
            .and_then(|i| images.get(i))
            .map(|image| image.description.contains(&marker))
            .unwrap_or(false)
    };

    let len = images.len() as i64;
    let number = i64::from(tag_number);
    let predicted = len + 1 - (number - number % 2 + 1) * 2;

    let probe = if verify(predicted) {
        Some((predicted, "predicted"))
    } else if predicted < len + 1 && verify(predicted + 1) {
        Some((predicted + 1, "next"))
    } else if predicted > 0 && verify(predicted - 1) {
        Some((predicted - 1, "previous"))
    } else {
        None
    };

    if let Some((index, strategy)) = probe {
        debug!(tag_number, is_proof, index, strategy, "Located tag");
        return usize::try_from(index).ok();
    }

    let found = (0..len).find(|&i| verify(i)).and_then(|i| usize::try_from(i).ok());
    match found {
        Some(index) => debug!(tag_number, is_proof, index, strategy = "scan", "Located tag"),
        None => debug!(tag_number, is_proof, "Tag not found"),
    }
    found
}
