//! Ranking engine: aggregate scores across people and order movies.
//!
//! ## Algorithm
//! 1. For every movie, sum the PreferenceEvaluator's score over all people
//! 2. Emit one ScoredMovie per input movie (no filtering, no deduplication)
//! 3. Sort by aggregate score, highest first
//!
//! The sort is stable, so movies with equal scores keep their input order.

use crate::evaluator::PreferenceEvaluator;
use data_loader::{Movie, MovieId, Person};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// A movie id paired with its aggregate score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    pub score: f64,
}

/// Orders movies by the summed preference scores of a roster of people.
///
/// Movies are scored in parallel with Rayon. Each movie's score depends only
/// on that movie and the roster, and results are collected in input order
/// before sorting, so the output matches a sequential pass exactly.
pub struct RankingEngine {
    evaluator: PreferenceEvaluator,
}

impl RankingEngine {
    /// Create a new RankingEngine.
    pub fn new(evaluator: PreferenceEvaluator) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &PreferenceEvaluator {
        &self.evaluator
    }

    /// Aggregate score of one movie across all people.
    pub fn aggregate(&self, movie: &Movie, people: &[Person]) -> f64 {
        let total: f64 = people
            .iter()
            .map(|person| self.evaluator.score(movie, person))
            .sum();
        // Folds -0.0 into 0.0 so equal scores compare equal under total_cmp
        total + 0.0
    }

    /// Rank movies for a roster of people.
    ///
    /// # Arguments
    /// * `movies` - Movies to rank; order is the tie-break order
    /// * `people` - Everyone whose preferences count
    ///
    /// # Returns
    /// One ScoredMovie per input movie, sorted by score descending
    #[instrument(skip_all, fields(movies = movies.len(), people = people.len()))]
    pub fn rank(&self, movies: &[Movie], people: &[Person]) -> Vec<ScoredMovie> {
        let mut scored: Vec<ScoredMovie> = movies
            .par_iter()
            .map(|movie| ScoredMovie {
                movie_id: movie.id.clone(),
                score: self.aggregate(movie, people),
            })
            .collect();

        scored.sort_by(|a, b| descending(a.score, b.score));

        debug!(
            "Ranked {} movies (top score: {:?})",
            scored.len(),
            scored.first().map(|s| s.score)
        );
        scored
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(PreferenceEvaluator::standard())
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Rank movies with the standard evaluator.
pub fn rank(movies: &[Movie], people: &[Person]) -> Vec<ScoredMovie> {
    RankingEngine::default().rank(movies, people)
}

/// Strip scores, keeping the ranked order of ids.
pub fn ranked_ids(ranking: &[ScoredMovie]) -> Vec<MovieId> {
    ranking.iter().map(|scored| scored.movie_id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Criterion, Preferences};

    fn movie(id: &str, year: &str, director: &str) -> Movie {
        let mut movie = Movie::new(id);
        movie.year = year.to_string();
        movie.director = director.to_string();
        movie
    }

    #[test]
    fn test_rank_sorts_descending() {
        // Scores: tt-a = 10, tt-b = -4, tt-c = 0
        let movies = vec![
            movie("tt-a", "2005", "Someone"),
            movie("tt-b", "1980", "Frank Darabont"),
            movie("tt-c", "1980", "Someone"),
        ];
        let people = vec![Person::new(
            "Ada",
            Preferences {
                after_year: Some(Criterion::new(2000, 10.0)),
                least_favorite_director: Some(Criterion::new("Frank Darabont".to_string(), 4.0)),
                ..Default::default()
            },
        )];

        let ranking = rank(&movies, &people);
        assert_eq!(ranked_ids(&ranking), vec!["tt-a", "tt-c", "tt-b"]);
        let scores: Vec<f64> = ranking.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![10.0, 0.0, -4.0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let movies = vec![
            movie("tt-1", "1990", "A"),
            movie("tt-2", "2010", "B"),
            movie("tt-3", "1990", "C"),
            movie("tt-4", "2010", "D"),
        ];
        let people = vec![Person::new(
            "Ada",
            Preferences {
                after_year: Some(Criterion::new(2000, 1.0)),
                ..Default::default()
            },
        )];

        let ranking = rank(&movies, &people);
        assert_eq!(ranked_ids(&ranking), vec!["tt-2", "tt-4", "tt-1", "tt-3"]);
    }

    #[test]
    fn test_no_people_keeps_input_order() {
        let movies = vec![movie("tt-1", "", ""), movie("tt-2", "", ""), movie("tt-3", "", "")];
        let ranking = rank(&movies, &[]);
        assert_eq!(ranked_ids(&ranking), vec!["tt-1", "tt-2", "tt-3"]);
        assert!(ranking.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_duplicate_movies_are_kept() {
        let movies = vec![movie("tt-1", "2001", ""), movie("tt-1", "2001", "")];
        let ranking = rank(&movies, &[]);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_scores_sum_across_people() {
        let movies = vec![movie("tt-1", "2001", "")];
        let fan = |weight: f64| {
            Person::new(
                "fan",
                Preferences {
                    after_year: Some(Criterion::new(2000, weight)),
                    ..Default::default()
                },
            )
        };
        let people = vec![fan(1.5), fan(2.0), fan(-0.5)];

        let ranking = rank(&movies, &people);
        assert_eq!(ranking[0].score, 3.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(&[], &[]).is_empty());
    }
}
