//! Album path
//!
//! For a requested round `R` the record draws on three entries:
//!
//! | Entry            | Number                       | Marker       |
//! |------------------|------------------------------|--------------|
//! | current mystery  | `max(R, 1)`                  | `#N tag`     |
//! | proof            | `max(R - 1, 1)`              | `#N proof`   |
//! | previous mystery | `R - 1` if proof > 1, else 1 | `#N tag`     |
//!
//! Only the current entry is required.

use super::urls::{thumbnail_url, url_extension};
use crate::extractors::tag_number_of;
use crate::extractors::templates::{credit_after_by, hint_phrase, parse_tag_title};
use crate::sequence::locate;
use crate::types::{BikeTagRecord, TagRequest, TaggedImage, IMGUR_BASE_URL};
use tracing::debug;

/// Round numbers derived from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundNumbers {
    pub mystery: i64,
    pub proof: i64,
    pub previous_mystery: i64,
}

impl RoundNumbers {
    pub fn for_request(requested: i64) -> Self {
        let proof = (requested - 1).max(1);
        Self {
            mystery: requested.max(1),
            proof,
            previous_mystery: if proof > 1 { requested - 1 } else { 1 },
        }
    }
}

/// Resolve `request` against an album sorted by tag number
///
/// Returns `None` for an empty album or when the current entry is missing.
pub fn assemble_from_album(images: &[TaggedImage], request: TagRequest) -> Option<BikeTagRecord> {
    let first = images.first()?;
    let requested = match request {
        TagRequest::Current => tag_number_of(first).map(i64::from).unwrap_or(-1),
        TagRequest::Number(number) => i64::from(number),
    };
    let numbers = RoundNumbers::for_request(requested);

    let find = |number: i64, is_proof: bool| -> Option<&TaggedImage> {
        let number = u32::try_from(number).ok()?;
        locate(images, number, is_proof).map(|index| &images[index])
    };

    let Some(current) = find(numbers.mystery, false) else {
        debug!(request = %request, tag_number = numbers.mystery, "Current tag not in album");
        return None;
    };
    let proof = find(numbers.proof, true);
    let previous_mystery = find(numbers.previous_mystery, false);

    let credit_source = proof.map_or(&current.description, |p| &p.description);
    let (gps, discussion_link) = parse_tag_title(&current.title);
    let extension = url_extension(&current.link);

    Some(BikeTagRecord {
        tag_number_requested: Some(request.to_string()),
        credit: credit_after_by(credit_source).unwrap_or_default(),
        hint: hint_phrase(&current.description).unwrap_or_default(),
        gps: gps.unwrap_or_default(),
        discussion_link: discussion_link.unwrap_or_default(),
        link: current.link.clone(),
        timestamp: current.datetime,
        current_tag_number: numbers.mystery,
        current_tag_url: current.link.clone(),
        current_tag_url_ext: extension.to_string(),
        current_tag_url_thumb: thumbnail_url(&current.link),
        imgur_base_url: IMGUR_BASE_URL.to_string(),
        previous_mystery_tag_number: numbers.previous_mystery,
        previous_mystery_tag: previous_mystery.cloned(),
        proof_tag_url: proof
            .map(|p| format!("{}/{}", IMGUR_BASE_URL, p.id))
            .unwrap_or_default(),
        proof_tag_number: numbers.proof,
        proof_tag: proof.cloned(),
        proof_text: proof.map(|p| p.description.clone()).unwrap_or_default(),
        image: current.clone(),
        ..Default::default()
    })
}
