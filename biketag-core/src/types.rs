//! Core data types
//!
//! - [`TaggedImage`]: one album entry as delivered by the image host
//! - [`BikeTagRecord`]: the assembled description of one round
//! - [`TagRequest`]: which round to resolve
//! - [`RedditPost`] / [`PostTagData`]: raw social posts and their parsed form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL used for proof links built from image ids
pub const IMGUR_BASE_URL: &str = "https://imgur.com";

/// Token requesting the most recent round
pub const CURRENT_TAG_TOKEN: &str = "current";

// ============================================================================
// Album entries
// ============================================================================

/// Album entry
///
/// Tag identity is carried inside `description` as `#<N> tag` or `#<N> proof`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedImage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    /// Upload time (unix seconds on the wire)
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub datetime: Option<DateTime<Utc>>,
}

impl TaggedImage {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_datetime(mut self, datetime: Option<DateTime<Utc>>) -> Self {
        self.datetime = datetime;
        self
    }
}

// ============================================================================
// Assembled record
// ============================================================================

/// Structured description of one round
///
/// Records are value objects: the assembler builds them once and the service
/// hands them out behind an `Arc`. `Default` is the full-field template every
/// assembled record is merged over; numbers default to `-1`, text to `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeTagRecord {
    pub tag_number_requested: Option<String>,
    pub author_flair: String,
    pub found_at: String,
    pub credit: String,
    pub hint: String,
    pub gps: String,
    pub discussion_link: String,
    pub link: String,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    pub current_tag_number: i64,
    #[serde(rename = "currentTagURL")]
    pub current_tag_url: String,
    #[serde(rename = "currentTagURLExt")]
    pub current_tag_url_ext: String,
    #[serde(rename = "currentTagURLThumb")]
    pub current_tag_url_thumb: String,
    pub imgur_base_url: String,
    pub previous_mystery_tag_number: i64,
    pub previous_mystery_tag: Option<TaggedImage>,
    #[serde(rename = "proofTagURL")]
    pub proof_tag_url: String,
    pub proof_tag_number: i64,
    pub proof_tag: Option<TaggedImage>,
    pub proof_text: String,
    pub image: TaggedImage,
}

impl Default for BikeTagRecord {
    fn default() -> Self {
        Self {
            tag_number_requested: None,
            author_flair: String::new(),
            found_at: String::new(),
            credit: String::new(),
            hint: String::new(),
            gps: String::new(),
            discussion_link: String::new(),
            link: String::new(),
            timestamp: None,
            current_tag_number: -1,
            current_tag_url: String::new(),
            current_tag_url_ext: String::new(),
            current_tag_url_thumb: String::new(),
            imgur_base_url: String::new(),
            previous_mystery_tag_number: -1,
            previous_mystery_tag: None,
            proof_tag_url: String::new(),
            proof_tag_number: -1,
            proof_tag: None,
            proof_text: String::new(),
            image: TaggedImage::default(),
        }
    }
}

// ============================================================================
// Tag requests
// ============================================================================

/// Which round to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagRequest {
    /// Most recent round (top of the sorted album)
    Current,
    Number(u32),
}

impl fmt::Display for TagRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRequest::Current => f.write_str(CURRENT_TAG_TOKEN),
            TagRequest::Number(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for TagRequest {
    type Err = biketag_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(CURRENT_TAG_TOKEN) {
            return Ok(TagRequest::Current);
        }
        s.parse::<u32>().map(TagRequest::Number).map_err(|_| {
            biketag_common::Error::InvalidInput(format!(
                "tag request must be a number or \"{}\", got \"{}\"",
                CURRENT_TAG_TOKEN, s
            ))
        })
    }
}

// ============================================================================
// Social posts
// ============================================================================

/// Raw post as returned by the post source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedditPost {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub selftext: String,
    #[serde(default)]
    pub media: Option<RedditMedia>,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub author_flair_text: Option<String>,
}

/// Embedded media of a link post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedditMedia {
    #[serde(default)]
    pub oembed: Option<OEmbed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OEmbed {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Post fields extracted by post ingestion
///
/// `tag_numbers` and `tag_image_urls` are parallel: the image for
/// `tag_numbers[i]` is `tag_image_urls[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostTagData {
    pub id: String,
    pub is_self_post: bool,
    pub selftext: String,
    pub post_body: String,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    pub tag_numbers: Vec<u32>,
    pub tag_image_urls: Vec<String>,
    pub credit: Option<String>,
    pub gps: Option<String>,
    pub found_at: Option<String>,
    pub hint: Option<String>,
    pub author_flair: Option<String>,
}

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as ""
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
