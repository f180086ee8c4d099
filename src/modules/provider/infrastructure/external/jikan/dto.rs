use serde::{Deserialize, Serialize};

/// Anime object as the list/detail endpoints return it, trimmed to the
/// fields this crate consumes. Unknown fields are ignored on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanAnime {
    pub mal_id: i64,
    pub title: Option<String>,
    pub images: Option<JikanImages>,
    pub trailer: Option<JikanTrailer>,
    pub aired: Option<JikanAired>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<String>,
    pub rating: Option<String>,
    pub score: Option<f32>,
    pub scored_by: Option<i64>,
    pub rank: Option<i32>,
    pub popularity: Option<i32>,
    pub synopsis: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
    pub webp: Option<JikanImageSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanTrailer {
    pub youtube_id: Option<String>,
    pub url: Option<String>,
    pub embed_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanAired {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Human-readable airing window, e.g. "Apr 3, 1998 to Apr 24, 1999"
    pub string: Option<String>,
}

/// Entry of the `/anime/{id}/characters` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanCharacterEntry {
    pub role: Option<String>,
    pub character: JikanCharacter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanCharacter {
    pub mal_id: i64,
    pub name: Option<String>,
    pub images: Option<JikanImages>,
}

/// Entry of the `/characters/{id}/pictures` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanPicture {
    pub jpg: Option<JikanImageSet>,
    pub webp: Option<JikanImageSet>,
}

impl JikanAnime {
    /// URL of the standard jpg image, the field every list view renders.
    pub fn jpg_image_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.jpg.as_ref())
            .and_then(|jpg| jpg.image_url.as_deref())
    }
}
