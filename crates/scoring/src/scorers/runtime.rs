//! Scorer for runtime preferences.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences, parser};

/// Rewards movies strictly shorter than the target duration.
///
/// Both sides go through the same runtime parser, so the target may be
/// written as "2h", "90min" or "1h 30min".
pub struct ShorterThanScorer;

impl Scorer for ShorterThanScorer {
    fn name(&self) -> &'static str {
        "shorterThan"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.shorter_than.as_ref()?;
        let satisfied = movie.runtime_minutes() < parser::runtime_minutes(&criterion.value);
        Some(if satisfied { criterion.weight } else { 0.0 })
    }
}
