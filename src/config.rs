// Runtime settings, read from the environment (and `.env` via dotenvy,
// loaded in `main`).

use crate::api::DEFAULT_BASE_URL;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub omdb_api_key: Option<String>,
    pub omdb_base_url: String,
    pub db_path: PathBuf,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            omdb_api_key: var("OMDB_API_KEY"),
            omdb_base_url: var("OMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            db_path: var("MOVIES_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            template_path: var("MOVIES_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("index_template.html")),
            output_path: var("MOVIES_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("index.html")),
            log_level: var("MOVIES_LOG").unwrap_or_else(|| "warn".into()),
        }
    }
}

/// `<data dir>/movies/movies.db`, or `./movies.db` without a data dir.
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("movies").join("movies.db"))
        .unwrap_or_else(|| PathBuf::from("movies.db"))
}
