use super::dto::{JikanAnime, JikanCharacterEntry, JikanImages, JikanPicture};
use crate::modules::anime::{AiredDates, AnimeDetail, AnimeSummary, CharacterRef, Picture};

/// Jikan (MyAnimeList) specific mapper: DTO -> domain entities.
pub struct JikanMapper;

impl JikanMapper {
    pub fn to_summary(data: JikanAnime) -> AnimeSummary {
        let (image_url, large_image_url) = Self::jpg_urls(&data.images);
        AnimeSummary {
            mal_id: data.mal_id,
            title: data.title.unwrap_or_default(),
            score: data.score,
            image_url,
            large_image_url,
            popularity: data.popularity,
            rank: data.rank,
        }
    }

    pub fn to_detail(data: JikanAnime) -> AnimeDetail {
        let (image_url, large_image_url) = Self::jpg_urls(&data.images);
        let aired = data
            .aired
            .map(|aired| AiredDates {
                from: aired.from,
                to: aired.to,
                display: aired.string,
            })
            .unwrap_or_default();

        AnimeDetail {
            mal_id: data.mal_id,
            title: data.title.unwrap_or_default(),
            synopsis: data.synopsis,
            trailer_embed_url: data.trailer.and_then(|trailer| trailer.embed_url),
            image_url,
            large_image_url,
            aired,
            season: data.season,
            year: data.year,
            duration: data.duration,
            rating: data.rating,
            score: data.score,
            scored_by: data.scored_by,
            rank: data.rank,
            popularity: data.popularity,
            status: data.status,
            source: data.source,
        }
    }

    pub fn to_character(entry: JikanCharacterEntry) -> CharacterRef {
        let (image_url, _) = Self::jpg_urls(&entry.character.images);
        CharacterRef {
            mal_id: entry.character.mal_id,
            name: entry.character.name.unwrap_or_default(),
            image_url,
            role: entry.role.unwrap_or_default(),
        }
    }

    pub fn to_picture(picture: JikanPicture) -> Picture {
        let jpg = picture.jpg;
        Picture {
            image_url: jpg.as_ref().and_then(|set| set.image_url.clone()),
            large_image_url: jpg.and_then(|set| set.large_image_url),
        }
    }

    fn jpg_urls(images: &Option<JikanImages>) -> (Option<String>, Option<String>) {
        match images.as_ref().and_then(|images| images.jpg.as_ref()) {
            Some(jpg) => (jpg.image_url.clone(), jpg.large_image_url.clone()),
            None => (None, None),
        }
    }
}
