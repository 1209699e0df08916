use movies_cli::catalog::{self, MovieFilter};
use movies_cli::error::{StorageError, WebsiteError};
use movies_cli::movie::{Movie, MovieRecord};
use movies_cli::stats::RatingStats;
use movies_cli::storage::MovieStorage;
use movies_cli::website;
use std::fs;
use tempfile::TempDir;

fn fresh_storage() -> (TempDir, MovieStorage) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let storage = MovieStorage::new(dir.path().join("movies.db"));
    storage.init().expect("init storage");
    (dir, storage)
}

#[test]
fn add_rejects_duplicate_titles() {
    let (_dir, storage) = fresh_storage();
    storage
        .add(&Movie::new("Alien", Some(1979), Some(8.5)))
        .expect("first add");

    let err = storage
        .add(&Movie::new("Alien", Some(1986), Some(8.4)))
        .unwrap_err();
    assert!(matches!(err, StorageError::Duplicate(ref t) if t == "Alien"));

    let movies = storage.list().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies["Alien"].year, Some(1979));
}

#[test]
fn update_only_changes_rating_of_existing_title() {
    let (_dir, storage) = fresh_storage();
    storage
        .add(&Movie::new("Heat", Some(1995), Some(8.3)).with_poster("https://img.example/heat.jpg"))
        .unwrap();

    storage.update_rating("Heat", 9.0).unwrap();
    let movies = storage.list().unwrap();
    assert_eq!(
        movies["Heat"],
        MovieRecord {
            year: Some(1995),
            rating: Some(9.0),
            poster_url: Some("https://img.example/heat.jpg".into()),
        }
    );

    let err = storage.update_rating("Ronin", 7.0).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
    assert!(!storage.list().unwrap().contains_key("Ronin"));
}

#[test]
fn update_rejects_out_of_range_rating() {
    let (_dir, storage) = fresh_storage();
    storage.add(&Movie::new("Heat", Some(1995), Some(8.3))).unwrap();
    let err = storage.update_rating("Heat", 12.0).unwrap_err();
    assert!(matches!(err, StorageError::InvalidRating(_)));
    assert_eq!(storage.list().unwrap()["Heat"].rating, Some(8.3));
}

#[test]
fn delete_removes_only_the_named_movie() {
    let (_dir, storage) = fresh_storage();
    storage.add(&Movie::new("Heat", Some(1995), Some(8.3))).unwrap();
    storage.add(&Movie::new("Ronin", Some(1998), Some(7.2))).unwrap();

    storage.delete("Heat").unwrap();
    let movies = storage.list().unwrap();
    assert!(!movies.contains_key("Heat"));
    assert!(movies.contains_key("Ronin"));

    assert!(matches!(storage.delete("Heat"), Err(StorageError::NotFound(_))));
}

#[test]
fn stats_over_stored_ratings() {
    let (_dir, storage) = fresh_storage();
    for (title, rating) in [("A", 5.0), ("B", 7.0), ("C", 9.0)] {
        storage.add(&Movie::new(title, Some(2000), Some(rating))).unwrap();
    }
    storage.add(&Movie::new("Unrated", Some(2000), None)).unwrap();

    let stats = RatingStats::compute(&storage.list().unwrap()).unwrap();
    assert_eq!(stats.mean, 7.0);
    assert_eq!(stats.median, 7.0);
    assert_eq!(stats.count, 3);
}

#[test]
fn min_rating_filter_excludes_null_ratings() {
    let (_dir, storage) = fresh_storage();
    storage.add(&Movie::new("Rated", Some(2001), Some(6.0))).unwrap();
    storage.add(&Movie::new("Unrated", Some(2001), None)).unwrap();

    let movies = storage.list().unwrap();
    let f = MovieFilter {
        min_rating: Some(5.0),
        ..Default::default()
    };
    let rows = catalog::filter(&movies, &f);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "Rated");
}

#[test]
fn website_generation_fails_without_template() {
    let (dir, storage) = fresh_storage();
    storage.add(&Movie::new("Heat", Some(1995), Some(8.3))).unwrap();

    let template = dir.path().join("missing_template.html");
    let output = dir.path().join("index.html");
    let err = website::generate(&template, &output, &storage.list().unwrap()).unwrap_err();
    assert!(matches!(err, WebsiteError::TemplateNotFound(ref p) if p == &template));
    assert!(!output.exists());
}

#[test]
fn website_is_written_from_template() {
    let (dir, storage) = fresh_storage();
    storage.add(&Movie::new("Heat", Some(1995), Some(8.3))).unwrap();
    storage.add(&Movie::new("Ronin", Some(1998), Some(7.2))).unwrap();

    let template = dir.path().join("index_template.html");
    let output = dir.path().join("index.html");
    fs::write(&template, "<title>__TEMPLATE_TITLE__</title><ul>__TEMPLATE_MOVIE_GRID__</ul>").unwrap();

    let count = website::generate(&template, &output, &storage.list().unwrap()).unwrap();
    assert_eq!(count, 2);

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<title>My Movie App</title>"));
    assert!(html.contains("Heat"));
    assert!(html.contains("Ronin"));
}

#[test]
fn website_requires_movies() {
    let (dir, storage) = fresh_storage();
    let template = dir.path().join("index_template.html");
    fs::write(&template, "__TEMPLATE_MOVIE_GRID__").unwrap();
    let err = website::generate(&template, &dir.path().join("index.html"), &storage.list().unwrap())
        .unwrap_err();
    assert!(matches!(err, WebsiteError::NoMovies));
}
