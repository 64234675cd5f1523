//! Preference scoring and ranking for movies.
//!
//! This crate provides:
//! - Scorer trait and one implementation per preference criterion
//! - PreferenceEvaluator for summing a person's criteria for a movie
//! - RankingEngine for aggregating across people and ordering movies
//! - Score breakdowns for explaining a ranking
//!
//! ## Architecture
//! Scoring runs leaf-first:
//! 1. Each scorer evaluates one optional criterion for one (movie, person) pair
//! 2. The PreferenceEvaluator sums the scorers for that pair
//! 3. The RankingEngine sums the evaluator over every person and sorts
//!
//! Everything here is pure and total: no I/O, no shared mutable state, and
//! no error type. Malformed metadata only makes criteria unsatisfied.
//!
//! ## Example Usage
//! ```ignore
//! use scoring::{rank, ranked_ids};
//!
//! let ranking = rank(&movies, &prompt.people);
//! let ids = ranked_ids(&ranking);
//! ```

pub mod traits;
pub mod scorers;
pub mod evaluator;
pub mod ranking;
pub mod breakdown;

// Re-export main types
pub use traits::Scorer;
pub use evaluator::{Contribution, PreferenceEvaluator, explain, score};
pub use ranking::{RankingEngine, ScoredMovie, rank, ranked_ids};
pub use breakdown::{PersonBreakdown, ScoreBreakdown};
