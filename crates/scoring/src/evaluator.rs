//! The PreferenceEvaluator combines scorers into a per-person score.
//!
//! This module provides the evaluator that chains every criterion scorer and
//! sums their contributions for one (movie, person) pair.

use crate::scorers::*;
use crate::traits::Scorer;
use data_loader::{Movie, Person};
use std::sync::LazyLock;
use tracing::trace;

/// Chains scorers together and sums their contributions.
///
/// ## Usage
/// ```ignore
/// let evaluator = PreferenceEvaluator::new()
///     .add_scorer(AfterYearScorer)
///     .add_scorer(FavoriteGenreScorer);
///
/// let score = evaluator.score(&movie, &person);
/// ```
///
/// Most callers want [`PreferenceEvaluator::standard`], which registers a
/// scorer for every supported criterion.
pub struct PreferenceEvaluator {
    scorers: Vec<Box<dyn Scorer>>,
}

/// One criterion's share of a person's score for a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub criterion: &'static str,
    pub amount: f64,
}

static STANDARD: LazyLock<PreferenceEvaluator> = LazyLock::new(PreferenceEvaluator::standard);

impl PreferenceEvaluator {
    /// Create a new evaluator with no scorers.
    pub fn new() -> Self {
        Self {
            scorers: Vec::new(),
        }
    }

    /// Create an evaluator with a scorer for every supported criterion.
    pub fn standard() -> Self {
        Self::new()
            .add_scorer(AfterYearScorer)
            .add_scorer(BeforeYearScorer)
            .add_scorer(MaximumAgeRatingScorer)
            .add_scorer(ShorterThanScorer)
            .add_scorer(FavoriteGenreScorer)
            .add_scorer(LeastFavoriteDirectorScorer)
            .add_scorer(FavoriteActorsScorer)
            .add_scorer(FavoritePlotElementsScorer)
            .add_scorer(MinimumRottenTomatoesScoreScorer)
    }

    /// Add a scorer to the evaluator (builder pattern).
    ///
    /// # Arguments
    /// * `scorer` - Any type implementing the Scorer trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorers.push(Box::new(scorer));
        self
    }

    /// Names of the registered scorers, in evaluation order.
    pub fn criteria(&self) -> Vec<&'static str> {
        self.scorers.iter().map(|scorer| scorer.name()).collect()
    }

    /// One person's score for one movie.
    ///
    /// Absent criteria contribute nothing; present ones are summed.
    pub fn score(&self, movie: &Movie, person: &Person) -> f64 {
        self.scorers
            .iter()
            .filter_map(|scorer| scorer.contribution(movie, &person.preferences))
            .sum()
    }

    /// Per-criterion breakdown of [`score`](Self::score).
    ///
    /// Lists every criterion the person holds, including ones that
    /// contributed zero. The amounts sum to `score(movie, person)`.
    pub fn explain(&self, movie: &Movie, person: &Person) -> Vec<Contribution> {
        let contributions: Vec<Contribution> = self
            .scorers
            .iter()
            .filter_map(|scorer| {
                scorer
                    .contribution(movie, &person.preferences)
                    .map(|amount| Contribution {
                        criterion: scorer.name(),
                        amount,
                    })
            })
            .collect();
        trace!(
            "Explained {} for {}: {} criteria",
            movie.id,
            person.name,
            contributions.len()
        );
        contributions
    }
}

impl Default for PreferenceEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}

/// One person's score for one movie, using the standard evaluator.
pub fn score(movie: &Movie, person: &Person) -> f64 {
    STANDARD.score(movie, person)
}

/// Per-criterion breakdown using the standard evaluator.
pub fn explain(movie: &Movie, person: &Person) -> Vec<Contribution> {
    STANDARD.explain(movie, person)
}
