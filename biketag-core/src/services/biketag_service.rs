//! BikeTag resolution service
//!
//! Front door for callers: fetches album and post data through the injected
//! sources, assembles records and memoizes everything in the shared cache.
//!
//! Cache ids per namespace:
//! - `AlbumImages`: `<source key>::<album hash>`
//! - `BikeTagRecord`: `<source key>::<album hash>::<request>`
//! - `TagsByUser`: `<album hash>`
//! - `RedditPosts`: `<subreddit>::<query json>`
//!
//! `uncached = true` skips the lookup but still stores the fresh result.

use crate::assembler::{assemble_from_album, assemble_from_post};
use crate::cache::{BikeTagCache, CacheValue};
use crate::error::{BikeTagError, BikeTagResult};
use crate::extractors::TextExtractor;
use crate::sequence::sort_by_tag_number;
use crate::services::post_parser::PostParser;
use crate::services::user_tags::{group_by_user, images_for_user, UserTags};
use crate::sources::{AlbumSource, Geocoder, PostQuery, PostSource};
use crate::types::{BikeTagRecord, RedditPost, TagRequest, TaggedImage};
use biketag_common::config::BikeTagConfig;
use biketag_common::CacheNamespace;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Service tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Deadline for one geocoding lookup
    pub geocoder_timeout: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            geocoder_timeout: Duration::from_millis(1000),
        }
    }
}

impl ServiceOptions {
    pub fn from_config(config: &BikeTagConfig) -> Self {
        Self {
            geocoder_timeout: config.geocoder.timeout(),
        }
    }
}

/// Tag resolution service
pub struct BikeTagService {
    cache: Arc<BikeTagCache>,
    extractor: TextExtractor,
    albums: Arc<dyn AlbumSource>,
    posts: Option<Arc<dyn PostSource>>,
    geocoder: Option<Arc<dyn Geocoder>>,
    options: ServiceOptions,
}

impl BikeTagService {
    pub fn new(cache: Arc<BikeTagCache>, albums: Arc<dyn AlbumSource>) -> Self {
        Self {
            extractor: TextExtractor::new(cache.clone()),
            cache,
            albums,
            posts: None,
            geocoder: None,
            options: ServiceOptions::default(),
        }
    }

    pub fn with_post_source(mut self, posts: Arc<dyn PostSource>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cache(&self) -> &Arc<BikeTagCache> {
        &self.cache
    }

    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    /// Album entries sorted by tag number
    pub async fn album_images(
        &self,
        album_hash: &str,
        uncached: bool,
    ) -> BikeTagResult<Arc<Vec<TaggedImage>>> {
        let cache_id = format!("{}::{}", self.albums.source_key(), album_hash);

        if !uncached {
            if let Some(CacheValue::Images(images)) =
                self.cache.get(CacheNamespace::AlbumImages, &cache_id)
            {
                debug!(album_hash = %album_hash, "Album images from cache");
                return Ok(images);
            }
        }

        let mut images = self.albums.album_images(album_hash).await?;
        sort_by_tag_number(&mut images);
        let images = Arc::new(images);

        self.cache
            .set(CacheNamespace::AlbumImages, &cache_id, CacheValue::Images(images.clone()));
        info!(album_hash = %album_hash, count = images.len(), "Loaded album images");
        Ok(images)
    }

    /// Record for `request`, or `None` when the album has no such round
    pub async fn tag_record(
        &self,
        album_hash: &str,
        request: TagRequest,
        uncached: bool,
    ) -> BikeTagResult<Option<Arc<BikeTagRecord>>> {
        let cache_id = format!("{}::{}::{}", self.albums.source_key(), album_hash, request);

        if !uncached {
            if let Some(CacheValue::Record(record)) =
                self.cache.get(CacheNamespace::BikeTagRecord, &cache_id)
            {
                debug!(cache_key = %cache_id, "Tag record from cache");
                return Ok(Some(record));
            }
        }

        let images = self.album_images(album_hash, uncached).await?;
        let Some(record) = assemble_from_album(&images, request) else {
            info!(album_hash = %album_hash, request = %request, "No record for requested tag");
            return Ok(None);
        };

        let record = Arc::new(record);
        self.cache
            .set(CacheNamespace::BikeTagRecord, &cache_id, CacheValue::Record(record.clone()));
        info!(
            album_hash = %album_hash,
            request = %request,
            tag_number = record.current_tag_number,
            "Resolved tag record"
        );
        Ok(Some(record))
    }

    /// Entries for one user, or all credited entries grouped by user
    pub async fn tags_by_user(
        &self,
        album_hash: &str,
        username: Option<&str>,
        uncached: bool,
    ) -> BikeTagResult<UserTags> {
        if let Some(username) = username {
            let images = self.album_images(album_hash, uncached).await?;
            return Ok(UserTags::ForUser(images_for_user(&images, username)));
        }

        if !uncached {
            if let Some(CacheValue::UserTags(grouped)) =
                self.cache.get(CacheNamespace::TagsByUser, album_hash)
            {
                debug!(album_hash = %album_hash, "User grouping from cache");
                return Ok(UserTags::Grouped(grouped));
            }
        }

        let images = self.album_images(album_hash, uncached).await?;
        let grouped = Arc::new(group_by_user(&images, &self.extractor));
        self.cache
            .set(CacheNamespace::TagsByUser, album_hash, CacheValue::UserTags(grouped.clone()));
        debug!(album_hash = %album_hash, users = grouped.len(), "Grouped album by user");
        Ok(UserTags::Grouped(grouped))
    }

    /// Bike Tag posts of a subreddit
    pub async fn subreddit_posts(
        &self,
        subreddit: &str,
        query: &PostQuery,
        uncached: bool,
    ) -> BikeTagResult<Arc<Vec<RedditPost>>> {
        let posts = self
            .posts
            .as_ref()
            .ok_or_else(|| BikeTagError::NotConfigured("post source".to_string()))?;

        let query_json = serde_json::to_string(query).map_err(biketag_common::Error::from)?;
        let cache_id = format!("{}::{}", subreddit, query_json);

        if !uncached {
            if let Some(CacheValue::Posts(cached)) =
                self.cache.get(CacheNamespace::RedditPosts, &cache_id)
            {
                debug!(subreddit = %subreddit, "Subreddit posts from cache");
                return Ok(cached);
            }
        }

        let fetched = Arc::new(posts.search_posts(subreddit, query).await?);
        self.cache
            .set(CacheNamespace::RedditPosts, &cache_id, CacheValue::Posts(fetched.clone()));
        info!(subreddit = %subreddit, count = fetched.len(), "Loaded subreddit posts");
        Ok(fetched)
    }

    /// Records assembled from a subreddit's Bike Tag posts
    pub async fn post_records(
        &self,
        subreddit: &str,
        query: &PostQuery,
        uncached: bool,
    ) -> BikeTagResult<Vec<BikeTagRecord>> {
        let posts = self.subreddit_posts(subreddit, query, uncached).await?;

        let parser = PostParser::new(self.extractor.clone()).with_album_source(self.albums.clone());
        let parsed = parser.parse_posts(&posts).await;

        let mut records = Vec::with_capacity(parsed.len());
        for data in &parsed {
            let record = assemble_from_post(
                data,
                self.geocoder.as_deref(),
                self.options.geocoder_timeout,
            )
            .await;
            match record {
                Some(record) => records.push(record),
                None => debug!(post_id = %data.id, "Post has no image for its tag"),
            }
        }

        info!(subreddit = %subreddit, records = records.len(), "Assembled post records");
        Ok(records)
    }

    /// Start periodic cache housekeeping on the current runtime
    pub fn spawn_cache_sweeper(&self) -> JoinHandle<()> {
        debug!(check_period_secs = self.cache.check_period().as_secs(), "Starting cache sweeper");
        self.cache.spawn_sweeper()
    }

    /// Drop every cached entry
    pub fn flush_cache(&self) {
        info!("Flushing the cache");
        self.cache.flush_all();
    }
}
