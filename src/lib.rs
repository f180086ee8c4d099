//! Client-side data access layer for anime discovery UIs, backed by the
//! Jikan (MyAnimeList mirror) v4 REST API.
//!
//! The crate mediates between presentation components and the remote API:
//! request deduplication, an in-memory response cache with inactivity-based
//! eviction, abort-on-navigation via a shared cancellation token, and a
//! small state machine holding pagination and per-mode result lists.
//! Presentation (routing, rendering) stays outside; everything below the
//! [`AppStore`] facade lives here.

pub mod modules;
pub mod shared;

pub use modules::anime::{AnimeDetail, AnimeSummary, CharacterRef, Picture};
pub use modules::provider::{
    ClientConfig, EmptyReason, JikanClient, Listing, PayloadFetch, RequestLifecycle,
    ResponseCache, TopFilter,
};
pub use modules::store::{AppStore, Transition, ViewState};
pub use shared::errors::{AppError, AppResult};
pub use shared::utils::logger::init_logger;
