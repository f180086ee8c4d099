pub mod anime;
pub mod character;

pub use anime::{AiredDates, AnimeDetail, AnimeSummary};
pub use character::{CharacterRef, Picture};
