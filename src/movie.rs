// Movie entity and parsing of user-entered numeric fields.

use crate::error::InputError;
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// A single movie as stored in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
}

/// Stored attributes of a movie, keyed by title in a [`MovieMap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieRecord {
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
}

/// Title -> attributes, ordered by title.
pub type MovieMap = BTreeMap<String, MovieRecord>;

impl Movie {
    pub fn new(title: impl Into<String>, year: Option<i64>, rating: Option<f64>) -> Self {
        Movie {
            title: title.into(),
            year,
            rating,
            poster_url: None,
        }
    }

    pub fn with_poster(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = Some(poster_url.into());
        self
    }

    /// Split into the map key and the stored attributes.
    pub fn into_entry(self) -> (String, MovieRecord) {
        (
            self.title,
            MovieRecord {
                year: self.year,
                rating: self.rating,
                poster_url: self.poster_url,
            },
        )
    }
}

impl MovieRecord {
    pub fn rating_label(&self) -> String {
        self.rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "N/A".into())
    }

    pub fn year_label(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".into())
    }
}

impl fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rating: {} | Year: {}", self.rating_label(), self.year_label())
    }
}

pub fn is_valid_rating(rating: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Parse a rating typed by the user. Must be a number within 0-10.
pub fn parse_rating(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(r) if is_valid_rating(r) => Ok(r),
        _ => Err(InputError::InvalidRating(trimmed.to_string())),
    }
}

/// Parse a four-digit-ish year. Only ASCII digits are accepted.
pub fn parse_year(input: &str) -> Result<i64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::InvalidYear(trimmed.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::InvalidYear(trimmed.to_string()))
}

/// Blank input means "no value".
pub fn parse_optional_rating(input: &str) -> Result<Option<f64>, InputError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_rating(input).map(Some)
}

pub fn parse_optional_year(input: &str) -> Result<Option<i64>, InputError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_year(input).map(Some)
}
