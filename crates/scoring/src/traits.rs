//! Core traits for preference scoring.
//!
//! This module defines the Scorer trait that lets each preference criterion
//! be evaluated independently and composed into a PreferenceEvaluator.

use data_loader::{Movie, Preferences};

/// Evaluates one preference criterion for one movie.
///
/// ## Design Note
/// - `Send + Sync` lets scorers be shared across the ranking thread pool
/// - Scorers are total: malformed movie fields mean "not satisfied", never an error
/// - Returning `None` means the person does not hold this criterion at all,
///   which is distinct from holding it and contributing zero
pub trait Scorer: Send + Sync {
    /// Criterion key as it appears in preference documents, e.g. "afterYear"
    fn name(&self) -> &'static str;

    /// Contribution of this criterion to one person's score for `movie`.
    ///
    /// # Returns
    /// * `Some(amount)` - The criterion is present; `amount` may be zero
    /// * `None` - The criterion is absent from `preferences`
    fn contribution(&self, movie: &Movie, preferences: &Preferences) -> Option<f64>;
}
