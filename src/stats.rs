// Rating statistics over the collection.

use crate::movie::MovieMap;

/// A rating value and every title that shares it.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedTitles {
    pub rating: f64,
    pub titles: Vec<String>,
}

/// Aggregate rating statistics. Unrated movies are left out entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub best: RatedTitles,
    pub worst: RatedTitles,
}

impl RatingStats {
    /// `None` when no movie has a rating.
    pub fn compute(movies: &MovieMap) -> Option<RatingStats> {
        let rated: Vec<(&String, f64)> = movies
            .iter()
            .filter_map(|(title, rec)| rec.rating.map(|r| (title, r)))
            .collect();
        if rated.is_empty() {
            return None;
        }

        let mut ratings: Vec<f64> = rated.iter().map(|(_, r)| *r).collect();
        ratings.sort_by(|a, b| a.total_cmp(b));

        let count = ratings.len();
        let mean = ratings.iter().sum::<f64>() / count as f64;
        let median = median_of_sorted(&ratings);
        let min = ratings[0];
        let max = ratings[count - 1];

        let tied = |value: f64| RatedTitles {
            rating: value,
            titles: rated
                .iter()
                .filter(|(_, r)| *r == value)
                .map(|(t, _)| (*t).clone())
                .collect(),
        };

        Some(RatingStats {
            count,
            mean,
            median,
            best: tied(max),
            worst: tied(min),
        })
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
