//! BikeTagService Tests
//!
//! Caching, failure propagation, user grouping and the post pipeline, run
//! against in-memory sources.

mod helpers;

use biketag_common::{CacheFacade, CacheNamespace};
use biketag_core::sources::PostQuery;
use biketag_core::types::{OEmbed, RedditMedia};
use biketag_core::{BikeTagError, BikeTagService, RedditPost, TagRequest, TaggedImage, UserTags};
use helpers::{synthetic_album, MockAlbumSource, MockGeocoder, MockPostSource};
use std::sync::Arc;
use std::time::Duration;

const ALBUM: &str = "album1";

fn service_with(albums: Arc<MockAlbumSource>) -> BikeTagService {
    BikeTagService::new(Arc::new(CacheFacade::default()), albums)
}

fn album_source() -> Arc<MockAlbumSource> {
    Arc::new(MockAlbumSource::default().with_album(ALBUM, synthetic_album(5)))
}

// =============================================================================
// Album path
// =============================================================================

#[tokio::test]
async fn test_album_images_are_sorted() {
    let service = service_with(album_source());
    let images = service.album_images(ALBUM, false).await.unwrap();

    let first: Vec<&str> = images.iter().take(3).map(|i| i.id.as_str()).collect();
    assert_eq!(first, vec!["t5", "p4", "t4"]);
}

#[tokio::test]
async fn test_second_lookup_served_from_cache() {
    let albums = album_source();
    let service = service_with(albums.clone());

    let first = service.tag_record(ALBUM, TagRequest::Current, false).await.unwrap().unwrap();
    let second = service.tag_record(ALBUM, TagRequest::Current, false).await.unwrap().unwrap();

    assert_eq!(albums.album_calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.current_tag_number, 5);
}

#[tokio::test]
async fn test_uncached_refetches() {
    let albums = album_source();
    let service = service_with(albums.clone());

    service.tag_record(ALBUM, TagRequest::Number(3), false).await.unwrap();
    let record = service.tag_record(ALBUM, TagRequest::Number(3), true).await.unwrap().unwrap();

    assert_eq!(albums.album_calls(), 2);
    assert_eq!(record.current_tag_number, 3);
}

#[tokio::test]
async fn test_records_cached_per_request() {
    let service = service_with(album_source());

    let current = service.tag_record(ALBUM, TagRequest::Current, false).await.unwrap().unwrap();
    let third = service.tag_record(ALBUM, TagRequest::Number(3), false).await.unwrap().unwrap();

    assert_eq!(current.current_tag_number, 5);
    assert_eq!(third.current_tag_number, 3);
    assert!(service.cache().get(CacheNamespace::BikeTagRecord, "mock::album1::current").is_some());
    assert!(service.cache().get(CacheNamespace::BikeTagRecord, "mock::album1::3").is_some());
}

#[tokio::test]
async fn test_missing_round_is_none_and_not_cached() {
    let service = service_with(album_source());

    let record = service.tag_record(ALBUM, TagRequest::Number(40), false).await.unwrap();
    assert!(record.is_none());
    assert!(service.cache().get(CacheNamespace::BikeTagRecord, "mock::album1::40").is_none());
}

#[tokio::test]
async fn test_flush_cache_empties_cache() {
    let albums = album_source();
    let service = service_with(albums.clone());

    service.tag_record(ALBUM, TagRequest::Current, false).await.unwrap();
    service.flush_cache();
    assert_eq!(service.cache().entry_count(), 0);

    service.tag_record(ALBUM, TagRequest::Current, false).await.unwrap();
    assert_eq!(albums.album_calls(), 2);
}

#[tokio::test]
async fn test_shared_cache_keeps_sources_apart() {
    let cache = Arc::new(CacheFacade::default());
    let first = BikeTagService::new(
        cache.clone(),
        Arc::new(
            MockAlbumSource::default()
                .with_source_key("first")
                .with_album(ALBUM, synthetic_album(5)),
        ),
    );
    let second = BikeTagService::new(
        cache,
        Arc::new(
            MockAlbumSource::default()
                .with_source_key("second")
                .with_album(ALBUM, synthetic_album(3)),
        ),
    );

    let a = first.tag_record(ALBUM, TagRequest::Current, false).await.unwrap().unwrap();
    let b = second.tag_record(ALBUM, TagRequest::Current, false).await.unwrap().unwrap();

    assert_eq!(a.current_tag_number, 5);
    assert_eq!(b.current_tag_number, 3);
}

#[tokio::test]
async fn test_cache_sweeper_evicts_expired_entries() {
    let cache = Arc::new(CacheFacade::new(
        Duration::from_millis(30),
        Duration::from_millis(10),
    ));
    let service = BikeTagService::new(cache, album_source());

    service.tag_record(ALBUM, TagRequest::Current, false).await.unwrap();
    assert!(service
        .cache()
        .get(CacheNamespace::BikeTagRecord, "mock::album1::current")
        .is_some());

    let sweeper = service.spawn_cache_sweeper();
    tokio::time::sleep(Duration::from_millis(120)).await;
    sweeper.abort();

    assert_eq!(service.cache().entry_count(), 0);
}

#[tokio::test]
async fn test_album_failure_propagates() {
    let service = service_with(Arc::new(MockAlbumSource::failing()));

    let result = service.tag_record(ALBUM, TagRequest::Current, false).await;
    assert!(matches!(result, Err(BikeTagError::Source(_))));
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_tags_grouped_by_user() {
    let service = service_with(album_source());

    let UserTags::Grouped(grouped) = service.tags_by_user(ALBUM, None, false).await.unwrap() else {
        panic!("expected grouped tags");
    };
    // player1 only tagged; players 2-5 tagged and proved the previous round
    assert_eq!(grouped["player1"].len(), 1);
    assert_eq!(grouped["player3"].len(), 2);
    assert_eq!(grouped.len(), 5);
    assert!(service.cache().get(CacheNamespace::TagsByUser, ALBUM).is_some());
}

#[tokio::test]
async fn test_tags_for_one_user() {
    let service = service_with(album_source());

    let UserTags::ForUser(images) = service
        .tags_by_user(ALBUM, Some("player2"), false)
        .await
        .unwrap()
    else {
        panic!("expected filtered tags");
    };
    let ids: Vec<&str> = images.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["t2", "p1"]);
}

// =============================================================================
// Posts
// =============================================================================

fn gallery_post() -> RedditPost {
    RedditPost {
        id: "gal".to_string(),
        author: "dana".to_string(),
        selftext: "[#10 tag](https://imgur.com/gallery/g10) new round is up".to_string(),
        created_utc: 1_600_000_000.0,
        ..Default::default()
    }
}

fn link_post() -> RedditPost {
    RedditPost {
        id: "lnk".to_string(),
        author: "eve".to_string(),
        media: Some(RedditMedia {
            oembed: Some(OEmbed {
                title: "Bike Tag #20".to_string(),
                description: "found at (the old mill)".to_string(),
                url: "https://i.imgur.com/t20.jpg".to_string(),
            }),
        }),
        created_utc: 1_600_000_500.0,
        ..Default::default()
    }
}

fn post_service(geocoder: Option<MockGeocoder>) -> (BikeTagService, Arc<MockPostSource>) {
    let albums = MockAlbumSource::default().with_gallery(
        "g10",
        vec![
            TaggedImage::new("t10", "#10 tag (hint: green gate) by u/dana")
                .with_link("https://i.imgur.com/t10.jpg"),
            TaggedImage::new("p9", "#9 proof found at (Lake St) by u/dana")
                .with_link("https://i.imgur.com/p9.jpg"),
        ],
    );
    let posts = Arc::new(MockPostSource::new(vec![
        gallery_post(),
        link_post(),
        RedditPost {
            id: "chat".to_string(),
            selftext: "who has the next tag?".to_string(),
            ..Default::default()
        },
    ]));

    let mut service = service_with(Arc::new(albums)).with_post_source(posts.clone());
    if let Some(geocoder) = geocoder {
        service = service.with_geocoder(Arc::new(geocoder));
    }
    (service, posts)
}

#[tokio::test]
async fn test_post_records_expand_galleries() {
    let (service, _) = post_service(None);
    let records = service
        .post_records("CyclingMSP", &PostQuery::default(), false)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);

    let gallery = &records[0];
    assert_eq!(gallery.current_tag_number, 10);
    assert_eq!(gallery.current_tag_url, "https://i.imgur.com/t10.jpg");
    assert_eq!(gallery.proof_tag_url, "https://i.imgur.com/p9.jpg");
    assert_eq!(gallery.credit, "dana");
    assert_eq!(gallery.hint, "green gate");
    assert_eq!(gallery.found_at, "Lake St");
    assert_eq!(gallery.discussion_link, "https://redd.it/gal");

    let link = &records[1];
    assert_eq!(link.current_tag_number, 20);
    assert_eq!(link.current_tag_url, "https://i.imgur.com/t20.jpg");
    assert_eq!(link.found_at, "the old mill");
    assert_eq!(link.credit, "eve");
}

#[tokio::test]
async fn test_posts_cached_per_query() {
    let (service, posts) = post_service(None);
    let query = PostQuery::default();

    service.subreddit_posts("CyclingMSP", &query, false).await.unwrap();
    service.subreddit_posts("CyclingMSP", &query, false).await.unwrap();
    assert_eq!(posts.calls(), 1);

    service
        .subreddit_posts("CyclingMSP", &query.clone().with_limit(5), false)
        .await
        .unwrap();
    assert_eq!(posts.calls(), 2);
}

#[tokio::test]
async fn test_geocoder_fills_missing_gps() {
    let (service, _) = post_service(Some(MockGeocoder::Found(44.98, -93.25)));
    let records = service
        .post_records("CyclingMSP", &PostQuery::default(), false)
        .await
        .unwrap();

    assert_eq!(records[1].gps, "44.98,-93.25");
}

#[tokio::test]
async fn test_geocoder_failure_leaves_gps_empty() {
    let (service, _) = post_service(Some(MockGeocoder::Failing));
    let records = service
        .post_records("CyclingMSP", &PostQuery::default(), false)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.gps.is_empty()));
}

#[tokio::test]
async fn test_posts_require_post_source() {
    let service = service_with(album_source());
    let result = service
        .post_records("CyclingMSP", &PostQuery::default(), false)
        .await;
    assert!(matches!(result, Err(BikeTagError::NotConfigured(_))));
}
