//! Field Extractors
//!
//! Independent pattern-based parsers, one per field found in BikeTag text:
//! 1. **tag_numbers** - `#<N>` markers, in first-occurrence order
//! 2. **credit** - the player credited for a tag or proof
//! 3. **found_location** - where the previous tag was found
//! 4. **hint** - numeric hints attached to a `hint:` marker
//! 5. **gps** - sexagesimal or decimal coordinate pairs
//! 6. **image_urls** - markdown links to the image host
//!
//! `templates` holds the inverse direction (rendering tag/proof text) next to
//! the delimiter-based field splitting used on album entries.
//!
//! Every `parse_*` function is pure and total over all strings. [`TextExtractor`]
//! memoizes them through the shared cache, keyed by the exact input text. The
//! cache stores the parse result before any fallback is applied, so cached and
//! uncached calls always agree.

use crate::cache::{BikeTagCache, CacheValue};
use biketag_common::CacheNamespace;
use regex::Regex;
use std::sync::Arc;
use tracing::error;

/// Declare a lazily compiled pattern
///
/// A pattern that fails to compile is logged once and then matches nothing.
macro_rules! text_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: once_cell::sync::Lazy<Option<regex::Regex>> =
            once_cell::sync::Lazy::new(|| $crate::extractors::compile(stringify!($name), $regex_str));
    };
}
pub(crate) use text_pattern;

pub(crate) fn compile(name: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            error!(pattern = name, error = %e, "Failed to compile extractor pattern");
            None
        }
    }
}

pub mod credit;
pub mod found_location;
pub mod gps;
pub mod hint;
pub mod image_urls;
pub mod tag_numbers;
pub mod templates;

pub use credit::{normalize_credit, parse_credit};
pub use found_location::parse_found_location;
pub use gps::parse_gps;
pub use hint::parse_hints;
pub use image_urls::parse_image_urls;
pub use tag_numbers::{parse_tag_numbers, tag_number_of};
pub use templates::{parse_tag_text, parse_tag_title, TagTextFields};

/// Memoizing front end for the field extractors
///
/// Holds the injected cache; clone freely.
#[derive(Clone)]
pub struct TextExtractor {
    cache: Arc<BikeTagCache>,
}

impl TextExtractor {
    pub fn new(cache: Arc<BikeTagCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<BikeTagCache> {
        &self.cache
    }

    /// Distinct tag numbers in first-occurrence order, or `fallback` (else `[]`)
    pub fn tag_numbers(&self, text: &str, fallback: Option<Vec<u32>>) -> Vec<u32> {
        let parsed = self.memoize(
            CacheNamespace::TagNumberText,
            text,
            |value| match value {
                CacheValue::TagNumbers(numbers) => Some(numbers),
                _ => None,
            },
            CacheValue::TagNumbers,
            parse_tag_numbers,
        );

        if parsed.is_empty() {
            fallback.unwrap_or_default()
        } else {
            parsed
        }
    }

    /// Credited username, or `fallback`
    pub fn credit(&self, text: &str, fallback: Option<&str>) -> Option<String> {
        self.text_field(CacheNamespace::CreditText, text, parse_credit)
            .or_else(|| fallback.map(str::to_string))
    }

    /// Found-at location, or `fallback`
    pub fn found_location(&self, text: &str, fallback: Option<&str>) -> Option<String> {
        self.text_field(CacheNamespace::FoundLocationText, text, parse_found_location)
            .or_else(|| fallback.map(str::to_string))
    }

    /// First coordinate string, or `fallback`
    pub fn gps(&self, text: &str, fallback: Option<&str>) -> Option<String> {
        self.text_field(CacheNamespace::GpsText, text, parse_gps)
            .or_else(|| fallback.map(str::to_string))
    }

    /// Numeric hints
    ///
    /// `None` without a `hint:` marker; an empty list when markers carry no
    /// digits. `fallback` replaces both.
    pub fn hints(&self, text: &str, fallback: Option<Vec<u32>>) -> Option<Vec<u32>> {
        let parsed = self.memoize(
            CacheNamespace::HintText,
            text,
            |value| match value {
                CacheValue::Hints(hints) => Some(hints),
                _ => None,
            },
            CacheValue::Hints,
            parse_hints,
        );

        match (parsed, fallback) {
            (Some(hints), Some(fallback)) if hints.is_empty() => Some(fallback),
            (None, fallback) => fallback,
            (parsed, _) => parsed,
        }
    }

    /// Image-host URLs in markdown links, or `fallback` (else `[]`)
    pub fn image_urls(&self, text: &str, fallback: Option<Vec<String>>) -> Vec<String> {
        let parsed = self.memoize(
            CacheNamespace::ImageUrlsText,
            text,
            |value| match value {
                CacheValue::Urls(urls) => Some(urls),
                _ => None,
            },
            CacheValue::Urls,
            parse_image_urls,
        );

        if parsed.is_empty() {
            fallback.unwrap_or_default()
        } else {
            parsed
        }
    }

    fn text_field(
        &self,
        namespace: CacheNamespace,
        text: &str,
        parse: fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.memoize(
            namespace,
            text,
            |value| match value {
                CacheValue::Text(text) => Some(text),
                _ => None,
            },
            CacheValue::Text,
            parse,
        )
    }

    fn memoize<T: Clone>(
        &self,
        namespace: CacheNamespace,
        text: &str,
        unwrap: fn(CacheValue) -> Option<T>,
        wrap: fn(T) -> CacheValue,
        parse: fn(&str) -> T,
    ) -> T {
        if let Some(cached) = self.cache.get(namespace, text).and_then(unwrap) {
            return cached;
        }

        let parsed = parse(text);
        self.cache.set(namespace, text, wrap(parsed.clone()));
        parsed
    }
}
