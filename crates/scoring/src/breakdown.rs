//! Score breakdowns for explaining a ranking.
//!
//! A breakdown records, for one movie, what every person's criteria
//! contributed. It is computed on demand for display and never feeds back
//! into ranking.

use crate::evaluator::{Contribution, PreferenceEvaluator};
use data_loader::{Movie, MovieId, Person};
use rayon::prelude::*;

/// Contributions from one person to one movie.
#[derive(Debug, Clone)]
pub struct PersonBreakdown {
    pub name: String,
    pub contributions: Vec<Contribution>,
    pub total: f64,
}

/// Everything that went into one movie's aggregate score.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub movie_id: MovieId,
    pub people: Vec<PersonBreakdown>,
    pub total: f64,
}

impl ScoreBreakdown {
    /// People whose criteria moved this movie's score.
    pub fn contributors(&self) -> impl Iterator<Item = &PersonBreakdown> {
        self.people.iter().filter(|p| p.total != 0.0)
    }
}

impl PreferenceEvaluator {
    /// Breakdown of one movie's score across all people.
    pub fn breakdown(&self, movie: &Movie, people: &[Person]) -> ScoreBreakdown {
        let people: Vec<PersonBreakdown> = people
            .iter()
            .map(|person| {
                let contributions = self.explain(movie, person);
                let total = contributions.iter().map(|c| c.amount).sum();
                PersonBreakdown {
                    name: person.name.clone(),
                    contributions,
                    total,
                }
            })
            .collect();

        let total = people.iter().map(|p| p.total).sum::<f64>() + 0.0;
        ScoreBreakdown {
            movie_id: movie.id.clone(),
            people,
            total,
        }
    }

    /// Breakdowns for many movies, in input order.
    pub fn breakdowns(&self, movies: &[Movie], people: &[Person]) -> Vec<ScoreBreakdown> {
        movies
            .par_iter()
            .map(|movie| self.breakdown(movie, people))
            .collect()
    }
}
