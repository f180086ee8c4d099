pub mod domain;

// Re-exports for easy external access
pub use domain::entities::{AiredDates, AnimeDetail, AnimeSummary, CharacterRef, Picture};
