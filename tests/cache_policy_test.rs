//! Cache policy properties observed through the store: single-fetch reuse,
//! search bypass, the size cutoff and the inactivity eviction window.

mod utils;

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use utils::{anime_json, store_over, ScriptedFetcher};

#[tokio::test(start_paused = true)]
async fn test_identical_requests_hit_network_at_most_once() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond("filter=bypopularity", json!([anime_json(1, "Naruto", 8.0)]));

    let store = store_over(fetcher.clone());
    store.load_popular().await;
    store.load_popular().await;
    store.load_popular().await;

    assert_eq!(fetcher.calls_matching("filter=bypopularity"), 1);
    assert_eq!(store.snapshot().await.popular_anime.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_searches_always_refetch() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond("order_by=score", json!([anime_json(2, "One Piece", 8.7)]));

    let store = store_over(fetcher.clone());
    store.search("one").await;
    store.search("one").await;

    assert_eq!(fetcher.calls_matching("order_by=score"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_oversized_payload_is_refetched_every_time() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    // One item whose serialized form alone crosses the 100,000-char cutoff
    let mut item = anime_json(1, "Monogatari", 8.5);
    item["synopsis"] = json!("x".repeat(100_000));
    fetcher.respond("filter=bypopularity", json!([item]));

    let store = store_over(fetcher.clone());
    store.load_popular().await;
    store.load_popular().await;

    assert_eq!(fetcher.calls_matching("filter=bypopularity"), 2);
    assert_eq!(store.snapshot().await.popular_anime.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_five_minutes_of_inactivity_drops_the_cache() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond("filter=bypopularity", json!([anime_json(1, "Naruto", 8.0)]));

    let store = store_over(fetcher.clone());
    store.load_popular().await;
    assert_eq!(fetcher.calls_matching("filter=bypopularity"), 1);

    // Within the window the cache still answers
    tokio::time::advance(Duration::from_secs(200)).await;
    store.load_popular().await;
    assert_eq!(fetcher.calls_matching("filter=bypopularity"), 1);

    // The hit above re-armed the window; now let it lapse untouched
    tokio::time::advance(Duration::from_secs(301)).await;
    store.load_popular().await;
    assert_eq!(fetcher.calls_matching("filter=bypopularity"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_pictures_are_cached_per_page_key() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(
        "/characters/40/pictures",
        json!([{"jpg": {"image_url": "https://cdn.myanimelist.net/images/characters/9/310307.jpg"}}]),
    );

    let store = store_over(fetcher.clone());
    store.load_pictures(40).await;
    store.load_pictures(40).await;
    assert_eq!(fetcher.calls_matching("/characters/40/pictures"), 1);

    // Same URL, different page in the composite key
    store.set_page(2).await;
    store.load_pictures(40).await;
    assert_eq!(fetcher.calls_matching("/characters/40/pictures"), 2);

    assert_eq!(store.snapshot().await.pictures.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_new_search_clears_cached_lists() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond("filter=bypopularity", json!([anime_json(1, "Naruto", 8.0)]));
    fetcher.respond("order_by=score", json!([anime_json(2, "One Piece", 8.7)]));

    let store = store_over(fetcher.clone());
    store.load_popular().await;
    store.search("one").await;

    // The popular entry was evicted by the search, so reloading refetches
    store.load_popular().await;
    assert_eq!(fetcher.calls_matching("filter=bypopularity"), 2);
}
