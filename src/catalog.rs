// In-memory queries over the full movie collection. The UI fetches a
// fresh `MovieMap` from storage before each of these.

use crate::movie::{MovieMap, MovieRecord};
use rand::seq::IteratorRandom;
use rand::Rng;

/// Optional bounds. A set bound excludes movies missing that field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovieFilter {
    pub min_rating: Option<f64>,
    pub start_year: Option<i64>,
    pub end_year: Option<i64>,
}

impl MovieFilter {
    pub fn matches(&self, record: &MovieRecord) -> bool {
        if let Some(min) = self.min_rating {
            match record.rating {
                Some(r) if r >= min => {}
                _ => return false,
            }
        }
        if let Some(start) = self.start_year {
            match record.year {
                Some(y) if y >= start => {}
                _ => return false,
            }
        }
        if let Some(end) = self.end_year {
            match record.year {
                Some(y) if y <= end => {}
                _ => return false,
            }
        }
        true
    }
}

/// Case-insensitive substring match on the title.
pub fn search<'a>(movies: &'a MovieMap, needle: &str) -> Vec<(&'a String, &'a MovieRecord)> {
    let needle = needle.trim().to_lowercase();
    movies
        .iter()
        .filter(|(title, _)| title.to_lowercase().contains(&needle))
        .collect()
}

pub fn filter<'a>(movies: &'a MovieMap, f: &MovieFilter) -> Vec<(&'a String, &'a MovieRecord)> {
    movies.iter().filter(|(_, rec)| f.matches(rec)).collect()
}

/// Rated movies, best first. Equal ratings keep title order.
pub fn sorted_by_rating(movies: &MovieMap) -> Vec<(&String, f64)> {
    let mut rated: Vec<(&String, f64)> = movies
        .iter()
        .filter_map(|(title, rec)| rec.rating.map(|r| (title, r)))
        .collect();
    rated.sort_by(|a, b| b.1.total_cmp(&a.1));
    rated
}

/// Movies with a known year, oldest first unless `latest_first`.
pub fn sorted_by_year(movies: &MovieMap, latest_first: bool) -> Vec<(&String, &MovieRecord)> {
    let mut dated: Vec<(&String, &MovieRecord)> =
        movies.iter().filter(|(_, rec)| rec.year.is_some()).collect();
    if latest_first {
        dated.sort_by(|a, b| b.1.year.cmp(&a.1.year));
    } else {
        dated.sort_by_key(|(_, rec)| rec.year);
    }
    dated
}

pub fn random_movie<'a, R: Rng + ?Sized>(
    movies: &'a MovieMap,
    rng: &mut R,
) -> Option<(&'a String, &'a MovieRecord)> {
    movies.iter().choose(rng)
}
