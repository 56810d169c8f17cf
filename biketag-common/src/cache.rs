//! Namespaced TTL cache
//!
//! Every key is a fixed namespace prefix followed by a caller-supplied content
//! identifier (raw input text, album hash, tag request, ...). Prefixes are
//! unique, so keys from different namespaces can never collide.
//!
//! Entries expire after the configured time-to-live. Eviction timing beyond
//! that is not guaranteed; `sweep` only flushes pending housekeeping.

use crate::config::CacheConfig;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shortest sweep interval; a zero period is raised to this
pub const MIN_CHECK_PERIOD: Duration = Duration::from_secs(1);

/// Key namespaces, one per extractor or record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    AlbumImages,
    RedditPosts,
    BikeTagRecord,
    TagsByUser,
    HintText,
    CreditText,
    FoundLocationText,
    TagNumberText,
    ImageUrlsText,
    GpsText,
}

impl CacheNamespace {
    pub const ALL: [CacheNamespace; 10] = [
        CacheNamespace::AlbumImages,
        CacheNamespace::RedditPosts,
        CacheNamespace::BikeTagRecord,
        CacheNamespace::TagsByUser,
        CacheNamespace::HintText,
        CacheNamespace::CreditText,
        CacheNamespace::FoundLocationText,
        CacheNamespace::TagNumberText,
        CacheNamespace::ImageUrlsText,
        CacheNamespace::GpsText,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            CacheNamespace::AlbumImages => "imgur::",
            CacheNamespace::RedditPosts => "reddit::",
            CacheNamespace::BikeTagRecord => "biketag::",
            CacheNamespace::TagsByUser => "usertags::",
            CacheNamespace::HintText => "hint::",
            CacheNamespace::CreditText => "credit::",
            CacheNamespace::FoundLocationText => "location::",
            CacheNamespace::TagNumberText => "tag::",
            CacheNamespace::ImageUrlsText => "images::",
            CacheNamespace::GpsText => "gps::",
        }
    }

    /// Full cache key for a content identifier
    pub fn key(self, id: &str) -> String {
        let prefix = self.prefix();
        let mut key = String::with_capacity(prefix.len() + id.len());
        key.push_str(prefix);
        key.push_str(id);
        key
    }
}

/// Shared key-value cache with TTL expiry
///
/// Cheap to share behind an `Arc`; reads and writes are thread-safe and
/// concurrent writes to the same key are last-write-wins.
pub struct CacheFacade<V>
where
    V: Clone + Send + Sync + 'static,
{
    entries: Cache<String, V>,
    ttl: Duration,
    check_period: Duration,
}

impl<V> CacheFacade<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache with explicit timings
    pub fn new(ttl: Duration, check_period: Duration) -> Self {
        let check_period = if check_period.is_zero() {
            warn!("Zero cache check period, using {:?}", MIN_CHECK_PERIOD);
            MIN_CHECK_PERIOD
        } else {
            check_period
        };
        info!(
            ttl_secs = ttl.as_secs(),
            check_period_secs = check_period.as_secs(),
            "BikeTag cache configured"
        );
        Self {
            entries: Cache::builder().time_to_live(ttl).build(),
            ttl,
            check_period,
        }
    }

    /// Create a cache from configuration
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl(), config.check_period())
    }

    pub fn get(&self, namespace: CacheNamespace, id: &str) -> Option<V> {
        self.entries.get(&namespace.key(id))
    }

    pub fn set(&self, namespace: CacheNamespace, id: &str, value: V) {
        self.entries.insert(namespace.key(id), value);
    }

    /// Drop every entry in every namespace
    pub fn flush_all(&self) {
        debug!("Flushing the cache");
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Run pending expiry housekeeping
    pub fn sweep(&self) {
        self.entries.run_pending_tasks();
        debug!(entries = self.entries.entry_count(), "Cache sweep complete");
    }

    /// Approximate entry count (exact after `sweep`)
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn check_period(&self) -> Duration {
        self.check_period
    }

    /// Sweep every check period on the current tokio runtime
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(cache.check_period);
            loop {
                interval.tick().await;
                cache.sweep();
            }
        })
    }
}

impl<V> Default for CacheFacade<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
