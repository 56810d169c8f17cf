//! Album ordering

use crate::extractors::tag_number_of;
use crate::types::TaggedImage;
use std::cmp::{Ordering, Reverse};

/// Sort key: tag number (`-1` when absent) and whether the entry is a proof
fn sort_key(image: &TaggedImage) -> (i64, bool) {
    match tag_number_of(image) {
        Some(number) => {
            let is_proof = image.description.contains(&format!("#{} proof", number));
            (i64::from(number), is_proof)
        }
        None => (-1, false),
    }
}

/// Descending tag number, proof before mystery tag for the same number
///
/// Entries without a tag number go last. The sort is stable.
pub fn sort_by_tag_number(images: &mut [TaggedImage]) {
    images.sort_by_cached_key(|image| {
        let (number, is_proof) = sort_key(image);
        (Reverse(number), Reverse(is_proof))
    });
}

/// Order by upload time; entries without a time count as oldest
///
/// Stable for equal times.
pub fn sort_by_upload_date(images: &mut [TaggedImage], newest_first: bool) {
    images.sort_by(|a, b| {
        let ordering: Ordering = a.datetime.cmp(&b.datetime);
        if newest_first {
            ordering.reverse()
        } else {
            ordering
        }
    });
}
