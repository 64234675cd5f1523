//! Scorer for favorite actors.
//!
//! ## Algorithm
//! 1. Split the movie's cast list
//! 2. Count cast entries that exactly match a favorite (k)
//! 3. Contribute weight / k
//!
//! The contribution shrinks as more favorites appear, which is how the
//! ranking service defines this criterion. With no matches (k = 0) the
//! contribution is zero rather than a division by zero.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences};

/// Scores movies by how many of the person's favorite actors they cast.
pub struct FavoriteActorsScorer;

impl Scorer for FavoriteActorsScorer {
    fn name(&self) -> &'static str {
        "favoriteActors"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.favorite_actors.as_ref()?;
        let matches = movie
            .cast()
            .into_iter()
            .filter(|member| criterion.value.iter().any(|fav| fav == member))
            .count();

        if matches == 0 {
            return Some(0.0);
        }
        Some(criterion.weight / matches as f64)
    }
}
