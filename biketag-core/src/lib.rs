//! biketag-core library
//!
//! Resolves BikeTag rounds from image albums and subreddit posts into
//! structured records.

pub mod assembler;
pub mod cache;
pub mod error;
pub mod extractors;
pub mod sequence;
pub mod services;
pub mod sources;
pub mod types;

pub use crate::cache::{new_cache, BikeTagCache, CacheValue, ImagesByUser};
pub use crate::error::{BikeTagError, BikeTagResult};
pub use crate::extractors::TextExtractor;
pub use crate::services::{BikeTagService, ServiceOptions, UserTags};
pub use crate::types::{BikeTagRecord, PostTagData, RedditPost, TagRequest, TaggedImage};
