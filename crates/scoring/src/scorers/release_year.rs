//! Scorers for release-year preferences.
//!
//! A movie whose year field is not a plain integer satisfies neither
//! criterion.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences};

/// Rewards movies released in or after the target year.
pub struct AfterYearScorer;

impl Scorer for AfterYearScorer {
    fn name(&self) -> &'static str {
        "afterYear"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.after_year.as_ref()?;
        let satisfied = movie
            .release_year()
            .is_some_and(|year| year >= criterion.value);
        Some(if satisfied { criterion.weight } else { 0.0 })
    }
}

/// Rewards movies released strictly before the target year.
pub struct BeforeYearScorer;

impl Scorer for BeforeYearScorer {
    fn name(&self) -> &'static str {
        "beforeYear"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.before_year.as_ref()?;
        let satisfied = movie
            .release_year()
            .is_some_and(|year| year < criterion.value);
        Some(if satisfied { criterion.weight } else { 0.0 })
    }
}
