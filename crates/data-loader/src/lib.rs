//! # Data Loader Crate
//!
//! This crate holds the domain records for preference ranking and the code
//! that turns raw metadata into them.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Person, Preferences, Prompt, MovieIndex)
//! - **parser**: Total parsers for loosely formatted metadata fields, plus fixture loading
//! - **index**: Build a MovieIndex and resolve prompt ids against it
//! - **error**: Error types for fixture loading and resolution
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieIndex;
//! use std::path::Path;
//!
//! let (prompt, index) = MovieIndex::load_fixture(Path::new("fixtures/movie_night.json"))?;
//! let movies = index.resolve(&prompt.movies)?;
//!
//! println!("{} movies, {} people", movies.len(), prompt.people.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases and constants
    MovieId,
    ROTTEN_TOMATOES,
    // Core types
    Criterion,
    ExternalRating,
    Movie,
    MovieIndex,
    Person,
    Preferences,
    Prompt,
    RankingFixture,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn shawshank_json() -> &'static str {
        r#"{
            "Title": "The Shawshank Redemption",
            "Year": "1994",
            "Rated": "R",
            "Runtime": "2h 22min",
            "Genre": "Drama",
            "Director": "Frank Darabont",
            "Actors": "Tim Robbins, Morgan Freeman",
            "Plot": "A banker is sentenced to life in prison.",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "9.3/10"},
                {"Source": "Rotten Tomatoes", "Value": "91%"}
            ],
            "imdbID": "tt0111161",
            "Response": "True"
        }"#
    }

    #[test]
    fn test_movie_index_creation() {
        let index = MovieIndex::new();
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_deserialize_metadata_service_movie() {
        let movie: Movie = serde_json::from_str(shawshank_json()).unwrap();

        assert_eq!(movie.id, "tt0111161");
        assert_eq!(movie.release_year(), Some(1994));
        assert_eq!(movie.runtime_minutes(), 142);
        assert_eq!(movie.cast(), vec!["Tim Robbins", "Morgan Freeman"]);
        assert_eq!(movie.rotten_tomatoes_score(), 91.0);
    }

    #[test]
    fn test_deserialize_camel_case_movie() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "id": "tt1", "year": "2001", "rated": "PG",
                "ratings": [{"source": "Rotten Tomatoes", "value": "40%"}]
            }"#,
        )
        .unwrap();

        assert_eq!(movie.id, "tt1");
        assert_eq!(movie.rated, "PG");
        assert_eq!(movie.rotten_tomatoes_score(), 40.0);
        assert!(movie.plot.is_empty());
    }

    #[test]
    fn test_missing_rating_source_is_zero() {
        let movie = Movie::new("tt1");
        assert_eq!(movie.rotten_tomatoes_score(), 0.0);
        assert_eq!(movie.external_score("Metacritic"), 0.0);
    }

    #[test]
    fn test_deserialize_sparse_preferences() {
        let person: Person = serde_json::from_str(
            r#"{
                "name": "Ada",
                "preferences": {
                    "afterYear": {"value": 1990, "weight": 5},
                    "favoriteActors": {"value": ["Morgan Freeman"], "weight": 2.5}
                }
            }"#,
        )
        .unwrap();

        let prefs = &person.preferences;
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs.after_year, Some(Criterion::new(1990, 5.0)));
        assert_eq!(
            prefs.favorite_actors,
            Some(Criterion::new(vec!["Morgan Freeman".to_string()], 2.5))
        );
        assert!(prefs.before_year.is_none());
    }

    #[test]
    fn test_person_without_preferences() {
        let person: Person = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert!(person.preferences.is_empty());
    }
}
