use crate::modules::anime::{AnimeSummary, Picture};
use serde::Serialize;

/// The single state record presentation components render from.
///
/// Mutated exclusively through [`apply`]; every list is replaced wholesale by
/// its loading transition. Exactly one filter/mode is active at a time and
/// switching modes never merges state from another mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub popular_anime: Vec<AnimeSummary>,
    pub upcoming_anime: Vec<AnimeSummary>,
    pub airing_anime: Vec<AnimeSummary>,
    pub pictures: Vec<Picture>,
    pub search_results: Vec<AnimeSummary>,
    pub is_search: bool,
    pub loading: bool,
    /// 1-based. Decrementing below 1 is prevented by disabling the control
    /// in the UI, not by clamping here.
    pub current_page: u32,
    pub items_per_page: u32,
}

impl ViewState {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            popular_anime: Vec::new(),
            upcoming_anime: Vec::new(),
            airing_anime: Vec::new(),
            pictures: Vec::new(),
            search_results: Vec::new(),
            is_search: false,
            loading: false,
            current_page: 1,
            items_per_page,
        }
    }
}

/// The closed set of named transitions. Nothing else mutates [`ViewState`].
#[derive(Debug, Clone)]
pub enum Transition {
    LoadingStart,
    PopularLoaded(Vec<AnimeSummary>),
    UpcomingLoaded(Vec<AnimeSummary>),
    AiringLoaded(Vec<AnimeSummary>),
    SearchLoaded(Vec<AnimeSummary>),
    PicturesLoaded(Vec<Picture>),
    PageChanged(u32),
    CacheCleared,
}

pub fn apply(state: &mut ViewState, transition: Transition) {
    match transition {
        Transition::LoadingStart => {
            state.loading = true;
        }
        Transition::PopularLoaded(list) => {
            state.popular_anime = list;
            state.loading = false;
            state.is_search = false;
        }
        Transition::UpcomingLoaded(list) => {
            state.upcoming_anime = list;
            state.loading = false;
            state.is_search = false;
        }
        Transition::AiringLoaded(list) => {
            state.airing_anime = list;
            state.loading = false;
            state.is_search = false;
        }
        Transition::SearchLoaded(list) => {
            state.search_results = list;
            state.loading = false;
            state.is_search = true;
        }
        Transition::PicturesLoaded(list) => {
            state.pictures = list;
            state.loading = false;
        }
        Transition::PageChanged(page) => {
            state.current_page = page;
        }
        Transition::CacheCleared => {
            state.popular_anime = Vec::new();
            state.upcoming_anime = Vec::new();
            state.airing_anime = Vec::new();
            state.pictures = Vec::new();
            state.search_results = Vec::new();
            state.is_search = false;
        }
    }
}
