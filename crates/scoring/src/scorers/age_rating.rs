//! Scorer for the maximum content rating a person accepts.
//!
//! Ratings are compared as plain strings. For the US scale this happens to
//! order "G" < "PG" < "PG-13" < "R", but other rating systems are not
//! guaranteed to sort sensibly.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences};

/// Rewards movies whose content rating sorts at or below the target.
pub struct MaximumAgeRatingScorer;

impl Scorer for MaximumAgeRatingScorer {
    fn name(&self) -> &'static str {
        "maximumAgeRating"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.maximum_age_rating.as_ref()?;
        let satisfied = movie.rated.as_str() <= criterion.value.as_str();
        Some(if satisfied { criterion.weight } else { 0.0 })
    }
}
