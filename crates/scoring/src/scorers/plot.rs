//! Scorer for favorite plot elements.
//!
//! Each favorite element found in the plot synopsis adds the full weight, so
//! the contribution grows linearly with the number of matched elements.

use crate::traits::Scorer;
use data_loader::{Movie, Preferences};

/// Rewards each favorite plot element that appears in the synopsis.
///
/// Matching is a case-insensitive substring search.
pub struct FavoritePlotElementsScorer;

impl Scorer for FavoritePlotElementsScorer {
    fn name(&self) -> &'static str {
        "favoritePlotElements"
    }

    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64> {
        let criterion = preferences.favorite_plot_elements.as_ref()?;
        let plot = movie.plot.to_lowercase();
        let matches = criterion
            .value
            .iter()
            .filter(|element| plot.contains(element.to_lowercase().as_str()))
            .count();
        Some(matches as f64 * criterion.weight)
    }
}
