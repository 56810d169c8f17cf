//! Cached value kinds for the BikeTag cache
//!
//! One `CacheFacade` instance is shared by the extractors and the service.
//! Each namespace stores exactly one variant of [`CacheValue`].

use crate::types::{BikeTagRecord, RedditPost, TaggedImage};
use biketag_common::config::CacheConfig;
use biketag_common::CacheFacade;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Images grouped by credited username
pub type ImagesByUser = BTreeMap<String, Vec<TaggedImage>>;

/// Value stored under a cache key
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// `TagNumberText`
    TagNumbers(Vec<u32>),
    /// `CreditText`, `FoundLocationText`, `GpsText`
    Text(Option<String>),
    /// `HintText`
    Hints(Option<Vec<u32>>),
    /// `ImageUrlsText`
    Urls(Vec<String>),
    /// `AlbumImages`
    Images(Arc<Vec<TaggedImage>>),
    /// `BikeTagRecord`
    Record(Arc<BikeTagRecord>),
    /// `TagsByUser`
    UserTags(Arc<ImagesByUser>),
    /// `RedditPosts`
    Posts(Arc<Vec<RedditPost>>),
}

pub type BikeTagCache = CacheFacade<CacheValue>;

/// Build a shareable cache from configuration
pub fn new_cache(config: &CacheConfig) -> Arc<BikeTagCache> {
    Arc::new(CacheFacade::from_config(config))
}
