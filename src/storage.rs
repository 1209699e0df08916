// Storage module: the movie table in a local SQLite file.
//
// Every call opens its own connection, runs a single parameterized
// statement (SQLite auto-commits it) and drops the connection again.

use crate::error::StorageError;
use crate::movie::{is_valid_rating, Movie, MovieMap, MovieRecord};
use rusqlite::{params, Connection, ErrorCode};
use std::path::PathBuf;
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT UNIQUE NOT NULL,
        year INTEGER,
        rating REAL,
        poster_url TEXT
    )";

#[derive(Clone, Debug)]
pub struct MovieStorage {
    path: PathBuf,
}

impl MovieStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MovieStorage { path: path.into() }
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        debug!(path = %self.path.display(), "opening database");
        Ok(Connection::open(&self.path)?)
    }

    /// Create the database file (and its directory) and the movies table.
    pub fn init(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.connect()?.execute(SCHEMA, [])?;
        info!(path = %self.path.display(), "movie table ready");
        Ok(())
    }

    /// All stored movies, keyed by title.
    pub fn list(&self) -> Result<MovieMap, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT title, year, rating, poster_url FROM movies")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                MovieRecord {
                    year: row.get(1)?,
                    rating: row.get(2)?,
                    poster_url: row.get(3)?,
                },
            ))
        })?;

        let mut movies = MovieMap::new();
        for row in rows {
            let (title, record) = row?;
            movies.insert(title, record);
        }
        debug!(count = movies.len(), "listed movies");
        Ok(movies)
    }

    /// Insert a new movie. Titles are unique.
    pub fn add(&self, movie: &Movie) -> Result<(), StorageError> {
        if movie.title.trim().is_empty() {
            return Err(StorageError::EmptyTitle);
        }
        if let Some(rating) = movie.rating {
            if !is_valid_rating(rating) {
                return Err(StorageError::InvalidRating(rating));
            }
        }

        let conn = self.connect()?;
        let res = conn.execute(
            "INSERT INTO movies (title, year, rating, poster_url) VALUES (?1, ?2, ?3, ?4)",
            params![movie.title, movie.year, movie.rating, movie.poster_url],
        );
        match res {
            Ok(_) => {
                info!(title = %movie.title, "movie added");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::Duplicate(movie.title.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn delete(&self, title: &str) -> Result<(), StorageError> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM movies WHERE title = ?1", params![title])?;
        if changed == 0 {
            return Err(StorageError::NotFound(title.to_string()));
        }
        info!(title, "movie deleted");
        Ok(())
    }

    /// Set a new rating. Nothing else about the movie changes.
    pub fn update_rating(&self, title: &str, rating: f64) -> Result<(), StorageError> {
        if !is_valid_rating(rating) {
            return Err(StorageError::InvalidRating(rating));
        }
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE movies SET rating = ?1 WHERE title = ?2",
            params![rating, title],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(title.to_string()));
        }
        info!(title, rating, "movie rating updated");
        Ok(())
    }
}
