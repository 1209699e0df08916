// Typed errors for the library modules. The UI layer wraps these in
// `anyhow` where it needs to, but mostly just prints them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("movie title must not be empty")]
    EmptyTitle,

    #[error("movie '{0}' already exists")]
    Duplicate(String),

    #[error("movie '{0}' was not found")]
    NotFound(String),

    #[error("rating {0} is outside 0-10")]
    InvalidRating(f64),

    #[error("could not create database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("OMDb API key is missing (set OMDB_API_KEY)")]
    MissingApiKey,

    #[error("could not reach OMDb API: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("unexpected OMDb response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("movie '{0}' not found in OMDb")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum WebsiteError {
    #[error("template file '{}' not found", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("no movies to include in the website")]
    NoMovies,

    #[error("website I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("invalid rating '{0}', expected a number between 0 and 10")]
    InvalidRating(String),

    #[error("invalid year '{0}'")]
    InvalidYear(String),
}
