//! Error types for the data-loader crate.
//!
//! Field parsing never fails (see `parser`), so these errors only come from
//! reading fixture files and resolving prompt ids against fetched metadata.

use thiserror::Error;

/// Errors that can occur while loading fixtures or resolving movies
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents were not a valid fixture document
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Referenced entity doesn't exist (e.g., prompt names a movie with no metadata)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
