use crate::modules::anime::{AnimeDetail, CharacterRef};
use crate::modules::provider::{
    ClientConfig, JikanClient, Listing, RequestLifecycle, TopFilter,
};
use crate::shared::errors::{AppError, AppResult};
use std::sync::Mutex;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::state::{apply, Transition, ViewState};

/// Facade the presentation layer talks to.
///
/// Owns the view state, the Jikan client (and through it the response cache)
/// and the request lifecycle. One instance per application, injected into
/// presentation components; all methods take `&self`. Every operation runs
/// on the single UI control flow, so transitions apply in dispatch order.
pub struct AppStore {
    state: RwLock<ViewState>,
    client: JikanClient,
    lifecycle: RequestLifecycle,
    search_input: Mutex<String>,
}

impl AppStore {
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let client = JikanClient::new(config)?;
        Ok(Self::with_client(client))
    }

    /// Build a store over a pre-built client; the constructor tests use.
    pub fn with_client(client: JikanClient) -> Self {
        let state = ViewState::new(client.config().items_per_page);
        Self {
            state: RwLock::new(state),
            client,
            lifecycle: RequestLifecycle::new(),
            search_input: Mutex::new(String::new()),
        }
    }

    /// Cloned state for rendering.
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub fn lifecycle(&self) -> &RequestLifecycle {
        &self.lifecycle
    }

    pub fn search_input(&self) -> String {
        self.search_input.lock().unwrap().clone()
    }

    /// Load the popular list for the current page.
    pub async fn load_popular(&self) {
        self.load_top(TopFilter::ByPopularity).await;
    }

    /// Load the upcoming list for the current page.
    pub async fn load_upcoming(&self) {
        self.load_top(TopFilter::Upcoming).await;
    }

    /// Load the currently-airing list for the current page.
    pub async fn load_airing(&self) {
        self.load_top(TopFilter::Airing).await;
    }

    async fn load_top(&self, filter: TopFilter) {
        self.dispatch(Transition::LoadingStart).await;

        let cancel = self.lifecycle.current();
        let page = self.state.read().await.current_page;
        let listing = self.client.top_anime(filter, page, cancel.clone()).await;

        if self.superseded(&cancel, &listing) {
            return;
        }

        let items = listing.into_items();
        let transition = match filter {
            TopFilter::ByPopularity => Transition::PopularLoaded(items),
            TopFilter::Upcoming => Transition::UpcomingLoaded(items),
            TopFilter::Airing => Transition::AiringLoaded(items),
        };
        self.dispatch(transition).await;
    }

    /// Run a free-text search. Starting a new search drops the whole
    /// response cache and the previous result lists.
    pub async fn search(&self, query: &str) {
        self.dispatch(Transition::LoadingStart).await;

        self.client.clear_cache();
        self.dispatch(Transition::CacheCleared).await;

        let cancel = self.lifecycle.current();
        let page = self.state.read().await.current_page;
        let listing = self.client.search_anime(query, page, cancel.clone()).await;

        if self.superseded(&cancel, &listing) {
            return;
        }

        self.dispatch(Transition::SearchLoaded(listing.into_items()))
            .await;
    }

    /// Load the picture gallery for a character.
    pub async fn load_pictures(&self, character_id: i64) {
        self.dispatch(Transition::LoadingStart).await;

        let cancel = self.lifecycle.current();
        let page = self.state.read().await.current_page;
        let listing = self
            .client
            .character_pictures(character_id, page, cancel.clone())
            .await;

        if self.superseded(&cancel, &listing) {
            return;
        }

        self.dispatch(Transition::PicturesLoaded(listing.into_items()))
            .await;
    }

    /// Page navigation: updates the page number only. The caller re-triggers
    /// the list load it wants under the new page.
    pub async fn set_page(&self, page: u32) {
        self.dispatch(Transition::PageChanged(page)).await;
    }

    /// Search-box change handler: empty input clears everything, anything
    /// else searches immediately.
    pub async fn handle_search_input(&self, value: &str) {
        *self.search_input.lock().unwrap() = value.to_string();

        if value.is_empty() {
            self.clear().await;
        } else {
            self.search(value).await;
        }
    }

    /// Search-box submit handler.
    pub async fn submit_search(&self) -> AppResult<()> {
        let input = self.search_input();
        if input.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter a search term".to_string(),
            ));
        }
        self.search(&input).await;
        Ok(())
    }

    /// Detail record for one anime; kept in per-view state by the caller,
    /// not in [`ViewState`].
    pub async fn anime_detail(&self, mal_id: i64) -> AppResult<Option<AnimeDetail>> {
        self.client
            .anime_detail(mal_id, self.lifecycle.current())
            .await
    }

    /// Characters for one anime; per-view state, like the detail record.
    pub async fn anime_characters(&self, mal_id: i64) -> Listing<CharacterRef> {
        self.client
            .anime_characters(mal_id, self.lifecycle.current())
            .await
    }

    /// Everything the detail view needs, fetched concurrently the way the
    /// view fires both requests on mount.
    pub async fn anime_page(
        &self,
        mal_id: i64,
    ) -> (AppResult<Option<AnimeDetail>>, Listing<CharacterRef>) {
        let cancel = self.lifecycle.current();
        futures::future::join(
            self.client.anime_detail(mal_id, cancel.clone()),
            self.client.anime_characters(mal_id, cancel),
        )
        .await
    }

    /// Cancel all in-flight work, drop the cache and reset the result lists.
    pub async fn clear(&self) {
        self.lifecycle.cancel_all();
        self.dispatch(Transition::CacheCleared).await;
        self.client.clear_cache();
    }

    /// Application teardown: stop pending work and the cache watcher.
    pub async fn shutdown(&self) {
        self.clear().await;
        self.client.shutdown();
    }

    async fn dispatch(&self, transition: Transition) {
        let mut state = self.state.write().await;
        apply(&mut state, transition);
    }

    /// A response whose token was superseded must not mutate state; the
    /// fetch that replaced it owns the next transition.
    fn superseded<T>(&self, cancel: &CancellationToken, listing: &Listing<T>) -> bool {
        if cancel.is_cancelled() || listing.is_cancelled() {
            debug!("Discarding response from a superseded request");
            return true;
        }
        false
    }
}
