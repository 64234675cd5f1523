//! Scorer implementations, one per preference criterion.
//!
//! Each scorer reads its own optional criterion from a person's preferences
//! and can be composed into a PreferenceEvaluator.

pub mod actors;
pub mod age_rating;
pub mod director;
pub mod genre;
pub mod plot;
pub mod release_year;
pub mod rotten_tomatoes;
pub mod runtime;

// Re-export for convenience
pub use actors::FavoriteActorsScorer;
pub use age_rating::MaximumAgeRatingScorer;
pub use director::LeastFavoriteDirectorScorer;
pub use genre::FavoriteGenreScorer;
pub use plot::FavoritePlotElementsScorer;
pub use release_year::{AfterYearScorer, BeforeYearScorer};
pub use rotten_tomatoes::MinimumRottenTomatoesScoreScorer;
pub use runtime::ShorterThanScorer;
