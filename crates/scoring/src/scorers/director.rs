//! Scorer for a director the person wants to avoid.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences};

/// Penalizes movies by the named director.
///
/// Matching is exact and case-sensitive. A match contributes the negated
/// weight.
pub struct LeastFavoriteDirectorScorer;

impl Scorer for LeastFavoriteDirectorScorer {
    fn name(&self) -> &'static str {
        "leastFavoriteDirector"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.least_favorite_director.as_ref()?;
        let matched = movie.director == criterion.value;
        Some(if matched { -criterion.weight } else { 0.0 })
    }
}
