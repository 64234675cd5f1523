//! MovieIndex building and prompt resolution.
//!
//! The index is built once all metadata for a prompt is available, either
//! from fetched records or from a fixture file. Resolution turns the prompt's
//! ordered id list back into an ordered list of movies and fails on the
//! first id with no metadata, so nothing downstream ever ranks a partial set.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

impl MovieIndex {
    /// Build an index from fetched movies.
    ///
    /// Later records replace earlier ones with the same id.
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let mut index = MovieIndex::new();
        for movie in movies {
            index.insert_movie(movie);
        }
        index
    }

    /// Load a ranking fixture and index its movies.
    ///
    /// Steps:
    /// 1. Parse the fixture JSON
    /// 2. Index the bundled movie metadata
    /// 3. Validate that every prompt id has metadata
    pub fn load_fixture(path: &Path) -> Result<(Prompt, Self)> {
        info!("Loading ranking fixture from {:?}", path);
        let fixture = parser::parse_fixture(path)?;

        let index = MovieIndex::from_movies(fixture.movies);
        index.validate(&fixture.prompt)?;

        info!(
            "Loaded {} movies and {} people",
            index.len(),
            fixture.prompt.people.len()
        );
        Ok((fixture.prompt, index))
    }

    /// Resolve ids to movies, preserving order and duplicates.
    pub fn resolve(&self, ids: &[MovieId]) -> Result<Vec<Movie>> {
        ids.iter()
            .map(|id| {
                self.get_movie(id)
                    .cloned()
                    .ok_or_else(|| DataLoadError::MissingReference {
                        entity: "Movie".to_string(),
                        id: id.clone(),
                    })
            })
            .collect()
    }

    /// Validate that the prompt can be ranked with this index.
    ///
    /// Checks that:
    /// - every prompt movie id has metadata
    /// - every criterion weight is a finite number
    ///
    /// JSON cannot encode NaN or infinity, so the weight check only fires for
    /// prompts whose `Preferences` were built in code.
    pub fn validate(&self, prompt: &Prompt) -> Result<()> {
        for id in &prompt.movies {
            if self.get_movie(id).is_none() {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    id: id.clone(),
                });
            }
        }

        for person in &prompt.people {
            if let Some(name) = first_non_finite_weight(&person.preferences) {
                return Err(DataLoadError::ValidationError(format!(
                    "{} has a non-finite weight on {}",
                    person.name, name
                )));
            }
        }

        debug!("Prompt with {} movies validated", prompt.movies.len());
        Ok(())
    }
}

fn first_non_finite_weight(preferences: &Preferences) -> Option<&'static str> {
    let weights = [
        ("afterYear", preferences.after_year.as_ref().map(|c| c.weight)),
        ("beforeYear", preferences.before_year.as_ref().map(|c| c.weight)),
        (
            "maximumAgeRating",
            preferences.maximum_age_rating.as_ref().map(|c| c.weight),
        ),
        ("shorterThan", preferences.shorter_than.as_ref().map(|c| c.weight)),
        ("favoriteGenre", preferences.favorite_genre.as_ref().map(|c| c.weight)),
        (
            "leastFavoriteDirector",
            preferences.least_favorite_director.as_ref().map(|c| c.weight),
        ),
        ("favoriteActors", preferences.favorite_actors.as_ref().map(|c| c.weight)),
        (
            "favoritePlotElements",
            preferences.favorite_plot_elements.as_ref().map(|c| c.weight),
        ),
        (
            "minimumRottenTomatoesScore",
            preferences
                .minimum_rotten_tomatoes_score
                .as_ref()
                .map(|c| c.weight),
        ),
    ];

    weights
        .into_iter()
        .find(|(_, weight)| weight.is_some_and(|w| !w.is_finite()))
        .map(|(name, _)| name)
}
