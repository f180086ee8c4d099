use serde::{Deserialize, Serialize};

/// List-level view of an anime as produced by the top/search endpoints.
///
/// Immutable once received; every successful fetch replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    pub mal_id: i64,
    pub title: String,
    pub score: Option<f32>,
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
    pub popularity: Option<i32>,
    pub rank: Option<i32>,
}

impl AnimeSummary {
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// Airing window of an anime. Raw ISO strings plus the human-readable form
/// the API already renders; nothing downstream does date arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiredDates {
    pub from: Option<String>,
    pub to: Option<String>,
    pub display: Option<String>,
}

/// Detail-page view: everything the summary carries plus the long-form
/// fields. Fetched once per detail-page visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub mal_id: i64,
    pub title: String,
    pub synopsis: Option<String>,
    pub trailer_embed_url: Option<String>,
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
    pub aired: AiredDates,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<String>,
    pub rating: Option<String>,
    pub score: Option<f32>,
    pub scored_by: Option<i64>,
    pub rank: Option<i32>,
    pub popularity: Option<i32>,
    pub status: Option<String>,
    pub source: Option<String>,
}
