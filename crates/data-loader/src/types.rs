//! Core domain types for preference ranking.
//!
//! This module defines the records the rest of the workspace passes around:
//! - Movie metadata as returned by the metadata service
//! - People and their sparse preference criteria
//! - The prompt (which movies to rank, for whom)
//!
//! Key Rust concepts demonstrated here:
//! - Generic structs (`Criterion<T>`) to share shape across payload types
//! - `Option<T>` to model "criterion absent" at the type level
//! - serde attributes to accept more than one wire spelling

use crate::parser;
use serde::Deserialize;
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (an IMDb id such as "tt0111161")
pub type MovieId = String;

/// Name of the external rating source the minimum-score criterion reads.
pub const ROTTEN_TOMATOES: &str = "Rotten Tomatoes";

// =============================================================================
// Movie-related Types
// =============================================================================

/// One named external rating attached to a movie, e.g. `("Rotten Tomatoes", "91%")`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalRating {
    #[serde(rename = "Source", alias = "source")]
    pub source: String,
    #[serde(rename = "Value", alias = "value")]
    pub value: String,
}

/// Metadata for a single movie.
///
/// Every field except the id is kept as the raw string the metadata service
/// sends. Interpretation (year, runtime, cast list, scores) happens through
/// the accessor methods below, which never fail: malformed input just yields
/// a value that satisfies no criterion.
///
/// The metadata service spells fields in PascalCase (`Year`, `Rated`, ...)
/// while local fixtures use camelCase; both deserialize into this struct.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    #[serde(rename = "imdbID", alias = "id")]
    pub id: MovieId,
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,
    #[serde(rename = "Year", alias = "year", default)]
    pub year: String,
    /// Content rating such as "PG-13"
    #[serde(rename = "Rated", alias = "rated", default)]
    pub rated: String,
    /// Free-form duration such as "2h 22min"
    #[serde(rename = "Runtime", alias = "runtime", default)]
    pub runtime: String,
    #[serde(rename = "Genre", alias = "genre", default)]
    pub genre: String,
    #[serde(rename = "Director", alias = "director", default)]
    pub director: String,
    /// Comma-separated cast list
    #[serde(rename = "Actors", alias = "actors", default)]
    pub actors: String,
    #[serde(rename = "Plot", alias = "plot", default)]
    pub plot: String,
    #[serde(rename = "Ratings", alias = "ratings", default)]
    pub ratings: Vec<ExternalRating>,
}

impl Movie {
    /// Create a movie with only an id; every other field is empty.
    pub fn new(id: impl Into<MovieId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            year: String::new(),
            rated: String::new(),
            runtime: String::new(),
            genre: String::new(),
            director: String::new(),
            actors: String::new(),
            plot: String::new(),
            ratings: Vec::new(),
        }
    }

    /// Release year, or `None` when the year field is not a plain integer.
    pub fn release_year(&self) -> Option<i32> {
        parser::parse_year(&self.year)
    }

    /// Runtime in whole minutes (see [`parser::runtime_minutes`]).
    pub fn runtime_minutes(&self) -> u32 {
        parser::runtime_minutes(&self.runtime)
    }

    /// Cast members in billing order.
    pub fn cast(&self) -> Vec<&str> {
        parser::split_cast(&self.actors)
    }

    /// Percentage score from the named external source.
    ///
    /// A missing source yields 0, the same as a source reporting "0%".
    pub fn external_score(&self, source: &str) -> f64 {
        self.ratings
            .iter()
            .find(|rating| rating.source == source)
            .map(|rating| parser::extract_percentage(&rating.value))
            .unwrap_or(0.0)
    }

    /// Shorthand for the Rotten Tomatoes score.
    pub fn rotten_tomatoes_score(&self) -> f64 {
        self.external_score(ROTTEN_TOMATOES)
    }
}

// =============================================================================
// Person-related Types
// =============================================================================

/// A single weighted preference rule.
///
/// The sign of `weight` is part of the preference definition; scorers never
/// flip it except where a criterion is defined as a penalty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Criterion<T> {
    pub value: T,
    pub weight: f64,
}

impl<T> Criterion<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// The sparse set of criteria one person holds.
///
/// Each field is present or absent independently. An absent criterion is
/// `None` and contributes nothing; a present criterion with weight 0 is still
/// `Some` and is evaluated (its contribution is just zero).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub after_year: Option<Criterion<i32>>,
    #[serde(default)]
    pub before_year: Option<Criterion<i32>>,
    #[serde(default)]
    pub maximum_age_rating: Option<Criterion<String>>,
    #[serde(default)]
    pub shorter_than: Option<Criterion<String>>,
    #[serde(default)]
    pub favorite_genre: Option<Criterion<String>>,
    #[serde(default)]
    pub least_favorite_director: Option<Criterion<String>>,
    #[serde(default)]
    pub favorite_actors: Option<Criterion<Vec<String>>>,
    #[serde(default)]
    pub favorite_plot_elements: Option<Criterion<Vec<String>>>,
    #[serde(default)]
    pub minimum_rotten_tomatoes_score: Option<Criterion<f64>>,
}

impl Preferences {
    /// Number of criteria present.
    pub fn len(&self) -> usize {
        [
            self.after_year.is_some(),
            self.before_year.is_some(),
            self.maximum_age_rating.is_some(),
            self.shorter_than.is_some(),
            self.favorite_genre.is_some(),
            self.least_favorite_director.is_some(),
            self.favorite_actors.is_some(),
            self.favorite_plot_elements.is_some(),
            self.minimum_rotten_tomatoes_score.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A voter. Names are for display only and need not be unique.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub preferences: Preferences,
}

impl Person {
    pub fn new(name: impl Into<String>, preferences: Preferences) -> Self {
        Self {
            name: name.into(),
            preferences,
        }
    }
}

// =============================================================================
// Prompt and Fixture Types
// =============================================================================

/// One ranking request: the movies to order and the people voting on them.
///
/// Both sequences are ordered; movie order is the tie-break order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Prompt {
    pub movies: Vec<MovieId>,
    pub people: Vec<Person>,
}

/// A prompt bundled with the metadata for its movies, as stored on disk for
/// offline ranking.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RankingFixture {
    pub prompt: Prompt,
    pub movies: Vec<Movie>,
}

// =============================================================================
// MovieIndex - Fetched Metadata Keyed by Id
// =============================================================================

/// Holds fetched movie metadata for lookup by id.
///
/// Building and resolving logic lives in `index.rs`.
#[derive(Debug, Default)]
pub struct MovieIndex {
    pub(crate) movies: HashMap<MovieId, Movie>,
}

impl MovieIndex {
    /// Creates a new, empty MovieIndex
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
        }
    }

    /// Get a movie by id
    pub fn get_movie(&self, id: &str) -> Option<&Movie> {
        self.movies.get(id)
    }

    /// Insert a movie, replacing any earlier record with the same id
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movies.insert(movie.id.clone(), movie);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
