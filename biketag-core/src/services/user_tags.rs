//! Album entries by player

use crate::cache::ImagesByUser;
use crate::extractors::TextExtractor;
use crate::types::TaggedImage;
use std::sync::Arc;

/// Result of a by-user query
#[derive(Debug, Clone, PartialEq)]
pub enum UserTags {
    /// Entries mentioning one username
    ForUser(Vec<TaggedImage>),
    /// Every credited entry, grouped by credited username
    Grouped(Arc<ImagesByUser>),
}

/// Entries whose description mentions `username`
pub fn images_for_user(images: &[TaggedImage], username: &str) -> Vec<TaggedImage> {
    images
        .iter()
        .filter(|image| image.description.contains(username))
        .cloned()
        .collect()
}

/// Group credited entries by username, keeping album order within a group
///
/// Entries without a credit are left out.
pub fn group_by_user(images: &[TaggedImage], extractor: &TextExtractor) -> ImagesByUser {
    let mut grouped = ImagesByUser::new();
    for image in images {
        if let Some(user) = extractor.credit(&image.description, None) {
            grouped.entry(user).or_default().push(image.clone());
        }
    }
    grouped
}
