use serde::{Deserialize, Serialize};

/// Character as listed alongside an anime's detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRef {
    pub mal_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    /// Role label within the anime ("Main", "Supporting", ...)
    pub role: String,
}

/// One gallery image for a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}
