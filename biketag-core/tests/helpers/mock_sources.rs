//! In-memory collaborators

use async_trait::async_trait;
use biketag_core::sources::{AlbumSource, Geocoder, PostQuery, PostSource, SourceError};
use biketag_core::{RedditPost, TaggedImage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Album source serving fixed albums and galleries, counting album fetches
#[derive(Default)]
pub struct MockAlbumSource {
    albums: HashMap<String, Vec<TaggedImage>>,
    galleries: HashMap<String, Vec<TaggedImage>>,
    fail: bool,
    key: Option<String>,
    album_calls: AtomicUsize,
}

impl MockAlbumSource {
    pub fn with_album(mut self, hash: &str, images: Vec<TaggedImage>) -> Self {
        self.albums.insert(hash.to_string(), images);
        self
    }

    pub fn with_gallery(mut self, id: &str, images: Vec<TaggedImage>) -> Self {
        self.galleries.insert(id.to_string(), images);
        self
    }

    pub fn with_source_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn album_calls(&self) -> usize {
        self.album_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlbumSource for MockAlbumSource {
    fn source_key(&self) -> &str {
        self.key.as_deref().unwrap_or("mock")
    }

    async fn album_images(&self, album_hash: &str) -> Result<Vec<TaggedImage>, SourceError> {
        self.album_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::Network("album source offline".to_string()));
        }
        self.albums
            .get(album_hash)
            .cloned()
            .ok_or_else(|| SourceError::NotAvailable(album_hash.to_string()))
    }

    async fn gallery_images(&self, gallery_id: &str) -> Result<Vec<TaggedImage>, SourceError> {
        self.galleries
            .get(gallery_id)
            .cloned()
            .ok_or_else(|| SourceError::NotAvailable(gallery_id.to_string()))
    }
}

/// Post source returning a fixed listing and recording queries
#[derive(Default)]
pub struct MockPostSource {
    posts: Vec<RedditPost>,
    queries: Mutex<Vec<(String, PostQuery)>>,
}

impl MockPostSource {
    pub fn new(posts: Vec<RedditPost>) -> Self {
        Self {
            posts,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl PostSource for MockPostSource {
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &PostQuery,
    ) -> Result<Vec<RedditPost>, SourceError> {
        self.queries
            .lock()
            .unwrap()
            .push((subreddit.to_string(), query.clone()));
        Ok(self.posts.clone())
    }
}

/// Geocoder with a canned answer
pub enum MockGeocoder {
    Found(f64, f64),
    Failing,
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn find_place(&self, _text: &str) -> Result<Option<(f64, f64)>, SourceError> {
        match self {
            MockGeocoder::Found(lat, lng) => Ok(Some((*lat, *lng))),
            MockGeocoder::Failing => Err(SourceError::Api(500, "geocoder down".to_string())),
        }
    }
}
