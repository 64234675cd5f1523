//! Scorer for a favorite genre.
//!
//! The movie's genre field is a free-text list such as "Crime, Drama". It is
//! lowercased before matching; the target is expected in lowercase already.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences};

/// Rewards movies whose lowercased genre text contains the target.
pub struct FavoriteGenreScorer;

impl Scorer for FavoriteGenreScorer {
    fn name(&self) -> &'static str {
        "favoriteGenre"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.favorite_genre.as_ref()?;
        let satisfied = movie.genre.to_lowercase().contains(criterion.value.as_str());
        Some(if satisfied { criterion.weight } else { 0.0 })
    }
}
