//! Social post path
//!
//! Builds a record from a parsed post. The post carries no album entries, so
//! the image title and description are rendered from the extracted fields
//! with the album templates; parsing them back yields the same fields.

use super::urls::{thumbnail_url, url_extension};
use crate::extractors::templates::{proof_description, proof_title, tag_description, tag_title};
use crate::sources::Geocoder;
use crate::types::{BikeTagRecord, PostTagData, TaggedImage, IMGUR_BASE_URL};
use std::time::Duration;
use tracing::{debug, warn};

/// Discussion link base for post ids
const REDDIT_SHORT_URL: &str = "https://redd.it";

/// Build the record for the highest tag number in `post`
///
/// Without an explicit GPS string, `geocoder` (when given) is asked for the
/// found-at text within `timeout`. Lookup failures leave `gps` empty.
/// Returns `None` when the post has no tag numbers or no image for the
/// mystery tag.
pub async fn assemble_from_post(
    post: &PostTagData,
    geocoder: Option<&dyn Geocoder>,
    timeout: Duration,
) -> Option<BikeTagRecord> {
    let mystery = *post.tag_numbers.iter().max()?;
    let current_url = post
        .tag_numbers
        .iter()
        .position(|&n| n == mystery)
        .and_then(|index| post.tag_image_urls.get(index))
        .filter(|url| !url.is_empty())?
        .clone();

    let mystery = i64::from(mystery);
    let has_proof = mystery - 1 > 0;
    let proof_number = (mystery - 1).max(1);
    let previous_mystery = if proof_number > 1 { mystery - 1 } else { 1 };
    let proof_url = if has_proof {
        url_for(post, proof_number).unwrap_or_default()
    } else {
        String::new()
    };

    let found_at = post.found_at.clone().unwrap_or_default();
    let credit = post.credit.clone().unwrap_or_default();
    let hint = post.hint.clone().unwrap_or_default();
    let gps = match &post.gps {
        Some(gps) if !gps.is_empty() => gps.clone(),
        _ => geocode(geocoder, &found_at, timeout).await.unwrap_or_default(),
    };
    let discussion_link = format!("{}/{}", REDDIT_SHORT_URL, post.id);

    let image = TaggedImage {
        id: String::new(),
        title: tag_title(&gps, &discussion_link),
        description: tag_description(mystery, &hint, &credit),
        link: current_url.clone(),
        datetime: post.timestamp,
    };
    let proof_tag = has_proof.then(|| TaggedImage {
        id: String::new(),
        title: proof_title(&gps),
        description: proof_description(proof_number, &found_at, &credit),
        link: proof_url.clone(),
        datetime: None,
    });
    let proof_text = proof_tag
        .as_ref()
        .map(|tag| tag.description.clone())
        .unwrap_or_default();

    debug!(post_id = %post.id, tag_number = mystery, "Assembled record from post");

    Some(BikeTagRecord {
        author_flair: post.author_flair.clone().unwrap_or_default(),
        found_at,
        credit,
        hint,
        gps,
        discussion_link,
        link: current_url.clone(),
        timestamp: post.timestamp,
        current_tag_number: mystery,
        current_tag_url_ext: url_extension(&current_url).to_string(),
        current_tag_url_thumb: thumbnail_url(&current_url),
        current_tag_url: current_url,
        imgur_base_url: IMGUR_BASE_URL.to_string(),
        previous_mystery_tag_number: previous_mystery,
        previous_mystery_tag: None,
        proof_tag_url: proof_url,
        proof_tag_number: proof_number,
        proof_tag,
        proof_text,
        image,
        ..Default::default()
    })
}

fn url_for(post: &PostTagData, number: i64) -> Option<String> {
    let number = u32::try_from(number).ok()?;
    let index = post.tag_numbers.iter().position(|&n| n == number)?;
    post.tag_image_urls.get(index).cloned()
}

/// `"lat,lng"` for `found_at`, if the lookup succeeds in time
async fn geocode(geocoder: Option<&dyn Geocoder>, found_at: &str, timeout: Duration) -> Option<String> {
    let geocoder = geocoder?;
    if found_at.trim().is_empty() {
        return None;
    }

    match tokio::time::timeout(timeout, geocoder.find_place(found_at)).await {
        Ok(Ok(Some((lat, lng)))) => Some(format!("{},{}", lat, lng)),
        Ok(Ok(None)) => {
            debug!(found_at = %found_at, "No geocoding candidates");
            None
        }
        Ok(Err(e)) => {
            warn!(found_at = %found_at, error = %e, "Geocoding failed");
            None
        }
        Err(_) => {
            warn!(found_at = %found_at, timeout_ms = timeout.as_millis() as u64, "Geocoding timed out");
            None
        }
    }
}
