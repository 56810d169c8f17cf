//! Post ingestion
//!
//! Turns raw subreddit posts into [`PostTagData`]:
//! 1. Choose the body (self text, or embedded media title + description)
//! 2. Extract image links, tag numbers, hint, found-at, GPS and credit
//! 3. Expand Imgur gallery/album links into their individual images
//! 4. Drop posts without tag numbers
//! 5. Derive a found-at remnant from the body when none was stated

use crate::extractors::templates::hint_phrase;
use crate::extractors::{normalize_credit, text_pattern, TextExtractor};
use crate::sources::AlbumSource;
use crate::types::{PostTagData, RedditPost, TaggedImage};
use biketag_common::time::from_unix_seconds_f64;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

const GALLERY_MARKER: &str = "://imgur.com/gallery/";
const ALBUM_MARKER: &str = "://imgur.com/a/";

text_pattern!(EMPTY_TAG_LINK, r"(?i)\[(?:bike)?\s*tag\s*\d*\]\(\s*\)");
text_pattern!(EMPTY_LABEL_LINK, r"(?i)\[\s*\]\(http[^)]*\)");
text_pattern!(MARKDOWN_LINK, r"\[([^\]]*)\]\(([^)]*)\)");
text_pattern!(TAG_LABEL, r"(?i)^(?:bike)?\s*tag");
text_pattern!(TAG_LABEL_PREFIX, r"(?i)\[(?:bike)?\s*tag\s*\d*\s*-");
text_pattern!(EMPTY_LINK_TARGET, r"\]\(\s*\)");
text_pattern!(LINE_BREAKS, r"[\r\n]");
text_pattern!(EMPTY_PARENS, r"\(\s*\)");
text_pattern!(HTML_ENTITY, r"&#?[a-zA-Z0-9]+;");
text_pattern!(ORPHAN_MARKER, r"(?i)\b(?:tag|proof)\s+by\b");
text_pattern!(TRAILING_AT, r"(?i)\s*\bat\s*$");
text_pattern!(LEADING_SEPARATOR, r"^\s*[-,]");

/// Image link found in a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageLink<'a> {
    Direct,
    Gallery(&'a str),
    Album(&'a str),
}

impl<'a> ImageLink<'a> {
    fn classify(url: &'a str) -> Self {
        let id_after = |marker: &str| {
            url.find(marker).map(|start| {
                let rest = &url[start + marker.len()..];
                let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
                &rest[..end]
            })
        };

        if let Some(id) = id_after(GALLERY_MARKER).filter(|id| !id.is_empty()) {
            ImageLink::Gallery(id)
        } else if let Some(id) = id_after(ALBUM_MARKER).filter(|id| !id.is_empty()) {
            ImageLink::Album(id)
        } else {
            ImageLink::Direct
        }
    }
}

/// Parses subreddit posts into tag data
pub struct PostParser {
    extractor: TextExtractor,
    albums: Option<Arc<dyn AlbumSource>>,
}

impl PostParser {
    pub fn new(extractor: TextExtractor) -> Self {
        Self {
            extractor,
            albums: None,
        }
    }

    /// Expand gallery and album links through `albums`
    pub fn with_album_source(mut self, albums: Arc<dyn AlbumSource>) -> Self {
        self.albums = Some(albums);
        self
    }

    /// Parse every post, dropping those without tag numbers
    pub async fn parse_posts(&self, posts: &[RedditPost]) -> Vec<PostTagData> {
        let mut parsed = Vec::with_capacity(posts.len());
        for post in posts {
            if let Some(data) = self.parse_post(post).await {
                parsed.push(data);
            }
        }
        debug!(posts = posts.len(), parsed = parsed.len(), "Parsed posts");
        parsed
    }

    /// Parse one post
    pub async fn parse_post(&self, post: &RedditPost) -> Option<PostTagData> {
        let oembed = post.media.as_ref().and_then(|media| media.oembed.as_ref());
        let (is_self_post, post_body, selftext) = match oembed {
            Some(oembed) if post.selftext.is_empty() => (
                false,
                format!("{} {}", oembed.title, oembed.description),
                oembed.url.clone(),
            ),
            _ => (true, post.selftext.clone(), post.selftext.clone()),
        };

        let extractor = &self.extractor;
        let image_urls = if is_self_post {
            extractor.image_urls(&selftext, None)
        } else {
            // Link posts carry the image as the bare media URL
            extractor.image_urls(&selftext, allowed_link(&selftext))
        };
        let body_numbers = extractor.tag_numbers(&post_body, None);

        let mut hint = hint_phrase(&post_body);
        let mut found_at = extractor.found_location(&post_body, None);
        let mut gps = extractor.gps(&post_body, None);
        let mut credit = extractor.credit(&post_body, None);
        let mut timestamp = from_unix_seconds_f64(post.created_utc);

        let mut numbers: Vec<u32> = Vec::new();
        let mut urls: Vec<String> = Vec::new();
        for (slot, url) in image_urls.iter().enumerate() {
            let slot_number = body_numbers.get(slot).copied();

            let Some(images) = self.expand(url).await else {
                if let Some(number) = slot_number.filter(|n| !numbers.contains(n)) {
                    numbers.push(number);
                    urls.push(url.clone());
                }
                continue;
            };

            for image in images {
                let text = format!("{} {}", image.title, image.description);
                let number = extractor.tag_numbers(&text, None).first().copied().or(slot_number);
                let Some(number) = number else {
                    continue;
                };

                hint = hint.or_else(|| hint_phrase(&text));
                found_at = found_at.or_else(|| extractor.found_location(&text, None));
                gps = gps.or_else(|| extractor.gps(&text, None));
                credit = credit.or_else(|| extractor.credit(&text, None));
                timestamp = image.datetime.or(timestamp);

                if !numbers.contains(&number) {
                    numbers.push(number);
                    urls.push(image.link);
                }
            }
        }
        for number in &body_numbers {
            if !numbers.contains(number) {
                numbers.push(*number);
            }
        }

        if numbers.is_empty() {
            debug!(post_id = %post.id, "Post has no readable tag numbers");
            return None;
        }

        let credit = credit
            .or_else(|| (!post.author.is_empty()).then(|| post.author.clone()))
            .map(|name| normalize_credit(&name));

        if found_at.is_none() {
            found_at = found_at_remnant(
                &post_body,
                &image_urls,
                &body_numbers,
                credit.as_deref(),
                gps.as_deref(),
                hint.as_deref(),
            );
        }

        Some(PostTagData {
            id: post.id.clone(),
            is_self_post,
            selftext,
            post_body,
            timestamp,
            tag_numbers: numbers,
            tag_image_urls: urls,
            credit,
            gps,
            found_at,
            hint,
            author_flair: post.author_flair_text.clone(),
        })
    }

    /// Images behind a gallery/album link; `None` for direct links or failures
    async fn expand(&self, url: &str) -> Option<Vec<TaggedImage>> {
        let link = ImageLink::classify(url);
        if link == ImageLink::Direct {
            return None;
        }
        let Some(albums) = &self.albums else {
            debug!(url = %url, "No album source for gallery expansion");
            return None;
        };

        let result = match link {
            ImageLink::Gallery(id) => albums.gallery_images(id).await,
            ImageLink::Album(id) => albums.album_images(id).await,
            ImageLink::Direct => return None,
        };
        match result {
            Ok(images) => Some(images),
            Err(e) => {
                warn!(url = %url, error = %e, "Gallery expansion failed");
                None
            }
        }
    }
}

fn allowed_link(url: &str) -> Option<Vec<String>> {
    (url.starts_with("http") && url.contains("imgur")).then(|| vec![url.to_string()])
}

/// Found-at text left in `body` once the known fields are removed
///
/// Strips image URLs, `#<n>` markers, the credit, GPS and hint text, markdown
/// link debris, line breaks, backslashes, empty parentheses, HTML entities,
/// a trailing `at` and a leading `-` or `,`, then collapses whitespace.
pub fn found_at_remnant(
    body: &str,
    image_urls: &[String],
    tag_numbers: &[u32],
    credit: Option<&str>,
    gps: Option<&str>,
    hint: Option<&str>,
) -> Option<String> {
    let mut text = body.to_string();

    for url in image_urls {
        text = text.replace(url.as_str(), "");
    }
    for number in tag_numbers {
        text = remove_dynamic(&text, &format!(r"#{}\b", number));
    }
    if let Some(credit) = credit.filter(|c| !c.is_empty()) {
        text = remove_dynamic(
            &text,
            &format!(
                r"(?i)(?:@|#|/?u/)?{}{}{}",
                word_edge(credit.chars().next()),
                regex::escape(credit),
                word_edge(credit.chars().last())
            ),
        );
    }
    text = remove(&text, &ORPHAN_MARKER);
    if let Some(gps) = gps.filter(|g| !g.is_empty()) {
        text = remove_dynamic(&text, &format!(r"(?i)(?:@|#)?{}", regex::escape(gps)));
    }
    if let Some(hint) = hint.filter(|h| !h.is_empty()) {
        text = remove_dynamic(
            &text,
            &format!(r"(?i)\(?(?:hint:?)?\s*{}(?:\s?\))?", regex::escape(hint)),
        );
    }

    text = remove(&text, &EMPTY_TAG_LINK);
    text = remove(&text, &EMPTY_LABEL_LINK);
    if let (Some(links), Some(tag_label)) = (MARKDOWN_LINK.as_ref(), TAG_LABEL.as_ref()) {
        text = links
            .replace_all(&text, |caps: &regex::Captures| {
                if tag_label.is_match(&caps[1]) {
                    caps[0].to_string()
                } else {
                    String::new()
                }
            })
            .into_owned();
    }
    text = remove(&text, &TAG_LABEL_PREFIX);
    text = remove(&text, &EMPTY_LINK_TARGET);
    text = remove(&text, &LINE_BREAKS);
    text = text.replace('\\', "");
    text = remove(&text, &EMPTY_PARENS);
    text = remove(&text, &HTML_ENTITY);
    text = remove(&text, &TRAILING_AT);
    text = remove(&text, &LEADING_SEPARATOR);

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// `\b` when `c` is a word character, so names only match as whole words
fn word_edge(c: Option<char>) -> &'static str {
    match c {
        Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
        _ => "",
    }
}

fn remove(text: &str, pattern: &Option<Regex>) -> String {
    match pattern {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

fn remove_dynamic(text: &str, pattern: &str) -> String {
    match Regex::new(pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "Skipping found-at cleanup pattern");
            text.to_string()
        }
    }
}
