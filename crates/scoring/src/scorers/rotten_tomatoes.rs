//! Scorer for a minimum Rotten Tomatoes score.
//!
//! A movie with no Rotten Tomatoes entry scores 0 here, so it fails any
//! positive minimum exactly like a movie rated "0%" would.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences};

/// Rewards movies whose Rotten Tomatoes score meets the target.
pub struct MinimumRottenTomatoesScoreScorer;

impl Scorer for MinimumRottenTomatoesScoreScorer {
    fn name(&self) -> &'static str {
        "minimumRottenTomatoesScore"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.minimum_rotten_tomatoes_score.as_ref()?;
        let satisfied = movie.rotten_tomatoes_score() >= criterion.value;
        Some(if satisfied { criterion.weight } else { 0.0 })
    }
}
