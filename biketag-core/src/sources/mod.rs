//! External data sources
//!
//! The resolution core only consumes these collaborators through traits so
//! tests and offline tools can swap in local data:
//! - [`AlbumSource`]: album and gallery listings ([`ImgurClient`], [`FileAlbumSource`])
//! - [`PostSource`]: subreddit search ([`RedditClient`])
//! - [`Geocoder`]: free text to coordinates ([`GooglePlacesGeocoder`])

use crate::types::{RedditPost, TaggedImage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod file_source;
pub mod geocoder;
pub mod imgur_client;
pub mod reddit_client;

pub use file_source::FileAlbumSource;
pub use geocoder::GooglePlacesGeocoder;
pub use imgur_client::ImgurClient;
pub use reddit_client::RedditClient;

/// Data source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request could not be sent or completed
    #[error("Network error: {0}")]
    Network(String),

    /// Remote API answered with a failure status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested resource does not exist or the source is unusable
    #[error("Not available: {0}")]
    NotAvailable(String),

    /// Request exceeded its deadline
    #[error("Request timed out")]
    Timeout,
}

/// Album listing provider
#[async_trait]
pub trait AlbumSource: Send + Sync {
    /// Short identifier used in cache keys (e.g. the API client id)
    fn source_key(&self) -> &str;

    /// All entries of an album, in source order
    async fn album_images(&self, album_hash: &str) -> Result<Vec<TaggedImage>, SourceError>;

    /// Entries of a gallery post
    async fn gallery_images(&self, gallery_id: &str) -> Result<Vec<TaggedImage>, SourceError>;
}

/// Subreddit search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    pub sort: String,
    pub limit: u32,
    pub time: String,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            sort: "new".to_string(),
            limit: 10,
            time: "year".to_string(),
        }
    }
}

impl PostQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Social post provider
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Posts in `subreddit` whose title mentions Bike Tag
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &PostQuery,
    ) -> Result<Vec<RedditPost>, SourceError>;
}

/// Free-text location lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best candidate `(lat, lng)` for `text`, if any
    async fn find_place(&self, text: &str) -> Result<Option<(f64, f64)>, SourceError>;
}

/// Map a reqwest failure onto [`SourceError`]
pub(crate) fn request_error(service: &str, e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Network(format!("{} request failed: {}", service, e))
    }
}
