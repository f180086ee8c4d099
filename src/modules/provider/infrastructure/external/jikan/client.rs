use crate::modules::anime::{AnimeDetail, AnimeSummary, CharacterRef, Picture};
use crate::modules::provider::domain::{ClientConfig, EmptyReason, Listing};
use crate::modules::provider::infrastructure::cache::{CacheStats, ResponseCache};
use crate::modules::provider::infrastructure::http_client::ReqwestFetcher;
use crate::modules::provider::traits::PayloadFetch;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::RateLimiter;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::dto::{JikanAnime, JikanCharacterEntry, JikanPicture};
use super::mapper::JikanMapper;

/// Mode selector for the top-anime list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopFilter {
    ByPopularity,
    Upcoming,
    Airing,
}

impl TopFilter {
    pub fn as_query(self) -> &'static str {
        match self {
            TopFilter::ByPopularity => "bypopularity",
            TopFilter::Upcoming => "upcoming",
            TopFilter::Airing => "airing",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TopFilter::ByPopularity => "popular anime",
            TopFilter::Upcoming => "upcoming anime",
            TopFilter::Airing => "airing anime",
        }
    }
}

/// Typed Jikan v4 client.
///
/// List-shaped operations collapse every failure to the empty sentinel: the
/// condition is logged (cancellation excepted, which is silent by contract)
/// and callers always receive a shape-valid result. Cacheable requests are
/// routed through the response cache under a (URL, page) key.
pub struct JikanClient {
    fetcher: Arc<dyn PayloadFetch>,
    cache: Arc<ResponseCache>,
    rate_limiter: Arc<RateLimiter>,
    config: ClientConfig,
}

impl JikanClient {
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let fetcher = Arc::new(ReqwestFetcher::new(&config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Build a client over a custom transport; the seam tests mock.
    pub fn with_fetcher(config: ClientConfig, fetcher: Arc<dyn PayloadFetch>) -> Self {
        let cache = Arc::new(ResponseCache::new(
            config.cache_ttl(),
            config.max_cacheable_chars,
        ));
        let rate_limiter = Arc::new(RateLimiter::new(config.requests_per_second));

        Self {
            fetcher,
            cache,
            rate_limiter,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get cache statistics for monitoring
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Clear all cached data
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Jikan client cache cleared");
    }

    /// Stop the cache's eviction watcher; part of application teardown.
    pub fn shutdown(&self) {
        self.cache.shutdown();
    }

    /// One page of the top-anime list for the given mode. Cached.
    pub async fn top_anime(
        &self,
        filter: TopFilter,
        page: u32,
        cancel: CancellationToken,
    ) -> Listing<AnimeSummary> {
        let url = format!(
            "{}/top/anime?filter={}&page={}&limit={}",
            self.config.base_url,
            filter.as_query(),
            page,
            self.config.items_per_page
        );

        self.fetch_list::<JikanAnime>(url, page, true, cancel, filter.label())
            .await
            .map(JikanMapper::to_summary)
    }

    /// Two-tier free-text search; never cached.
    ///
    /// The primary tier orders by score with a score floor and post-filters
    /// for image, positive score and a case-insensitive title match. When
    /// that yields nothing, a lenient tier orders by popularity without the
    /// floor and only requires image and title. Precision traded for recall;
    /// the strict tier often misses loosely-matching titles entirely.
    pub async fn search_anime(
        &self,
        query: &str,
        page: u32,
        cancel: CancellationToken,
    ) -> Listing<AnimeSummary> {
        let query = query.trim();
        let needle = query.to_lowercase();

        let primary_url =
            self.search_url(query, "score", page, Some(self.config.min_search_score));
        let primary = self
            .fetch_list::<JikanAnime>(primary_url, page, false, cancel.clone(), "search results")
            .await;

        let strict: Vec<JikanAnime> = match primary {
            Listing::Empty(EmptyReason::Cancelled) => {
                return Listing::Empty(EmptyReason::Cancelled)
            }
            // A failed primary degrades to an empty candidate set; the
            // fallback tier still gets its chance.
            Listing::Empty(_) => Vec::new(),
            Listing::Items(items) => items
                .into_iter()
                .filter(|anime| matches_strict(anime, &needle))
                .collect(),
        };

        if !strict.is_empty() {
            return Listing::Items(strict.into_iter().map(JikanMapper::to_summary).collect());
        }

        debug!(
            "Strict search for {:?} matched nothing, retrying by popularity",
            query
        );
        let fallback_url = self.search_url(query, "popularity", page, None);
        match self
            .fetch_list::<JikanAnime>(fallback_url, page, false, cancel, "search results")
            .await
        {
            Listing::Items(items) => Listing::Items(
                items
                    .into_iter()
                    .filter(matches_lenient)
                    .map(JikanMapper::to_summary)
                    .collect(),
            ),
            Listing::Empty(reason) => Listing::Empty(reason),
        }
    }

    /// Full detail record for one anime. Uncached; fetched per detail-page
    /// visit. A 404 is an absent anime, not a failure.
    pub async fn anime_detail(
        &self,
        mal_id: i64,
        cancel: CancellationToken,
    ) -> AppResult<Option<AnimeDetail>> {
        self.rate_limiter.wait().await;

        let url = format!("{}/anime/{}", self.config.base_url, mal_id);
        let payload = match self.fetcher.fetch_payload(&url, cancel).await {
            Ok(payload) => payload,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let data: JikanAnime = serde_json::from_value(payload)
            .map_err(|e| AppError::SerializationError(format!("Failed to parse Jikan anime: {}", e)))?;

        Ok(Some(JikanMapper::to_detail(data)))
    }

    /// Characters listed on an anime's detail page. Uncached.
    pub async fn anime_characters(
        &self,
        mal_id: i64,
        cancel: CancellationToken,
    ) -> Listing<CharacterRef> {
        let url = format!("{}/anime/{}/characters", self.config.base_url, mal_id);
        self.fetch_list::<JikanCharacterEntry>(url, 1, false, cancel, "characters")
            .await
            .map(JikanMapper::to_character)
    }

    /// Gallery images for one character. Cached under the page the UI is
    /// currently on, which keeps the key format uniform across endpoints.
    pub async fn character_pictures(
        &self,
        character_id: i64,
        page: u32,
        cancel: CancellationToken,
    ) -> Listing<Picture> {
        let url = format!(
            "{}/characters/{}/pictures?limit={}",
            self.config.base_url, character_id, self.config.picture_limit
        );
        self.fetch_list::<JikanPicture>(url, page, true, cancel, "pictures")
            .await
            .map(JikanMapper::to_picture)
    }

    fn search_url(&self, query: &str, order_by: &str, page: u32, min_score: Option<u32>) -> String {
        let mut url = format!(
            "{}/anime?q={}&order_by={}&sort=desc&sfw=true&page={}&limit={}",
            self.config.base_url,
            urlencoding::encode(query),
            order_by,
            page,
            self.config.items_per_page
        );
        if let Some(min_score) = min_score {
            url.push_str(&format!("&min_score={}", min_score));
        }
        url
    }

    /// Shared list-fetch path: rate limit, cache-or-fetch, decode, and the
    /// error-to-empty collapse described in the type's docs.
    async fn fetch_list<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        page: u32,
        cacheable: bool,
        cancel: CancellationToken,
        what: &str,
    ) -> Listing<T> {
        let key = ResponseCache::key_for(&url, page);
        let result = self
            .cache
            .get_or_fetch(&key, cacheable, || async {
                self.rate_limiter.wait().await;
                self.fetcher.fetch_payload(&url, cancel).await
            })
            .await;

        match result {
            Ok(payload) => match serde_json::from_value::<Vec<T>>(payload) {
                Ok(items) => Listing::Items(items),
                Err(e) => {
                    warn!("Failed to parse {} payload: {}", what, e);
                    Listing::Empty(EmptyReason::Decode)
                }
            },
            Err(AppError::Cancelled(_)) => {
                debug!("Fetch of {} cancelled", what);
                Listing::Empty(EmptyReason::Cancelled)
            }
            Err(e) => {
                warn!("Error fetching {}: {}", what, e);
                Listing::Empty(EmptyReason::from_error(&e))
            }
        }
    }
}

fn matches_strict(anime: &JikanAnime, needle: &str) -> bool {
    anime.jpg_image_url().is_some()
        && anime.score.unwrap_or(0.0) > 0.0
        && anime
            .title
            .as_ref()
            .map(|title| title.to_lowercase().contains(needle))
            .unwrap_or(false)
}

fn matches_lenient(anime: &JikanAnime) -> bool {
    anime.jpg_image_url().is_some()
        && anime
            .title
            .as_ref()
            .map(|title| !title.is_empty())
            .unwrap_or(false)
}
