// UI layer: the interactive numbered menu, built on `dialoguer`.
// Every action reloads the collection from storage, and storage or lookup
// errors are printed rather than ending the session.

use crate::api::OmdbClient;
use crate::catalog::{self, MovieFilter};
use crate::config::Config;
use crate::movie::{parse_optional_rating, parse_optional_year, MovieMap, MovieRecord};
use crate::stats::RatingStats;
use crate::storage::MovieStorage;
use crate::website;
use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

const MENU: [&str; 12] = [
    "0. Exit",
    "1. List movies",
    "2. Add movie",
    "3. Delete movie",
    "4. Update movie",
    "5. Stats",
    "6. Random movie",
    "7. Search movie",
    "8. Movies sorted by rating",
    "9. Movies sorted by year",
    "10. Filter movies",
    "11. Generate website",
];

// Year sort is oldest first unless the user answers yes.
const LATEST_FIRST_DEFAULT: bool = false;

/// Everything the menu actions need.
pub struct App {
    pub storage: MovieStorage,
    pub omdb: OmdbClient,
    pub config: Config,
}

/// Main interactive menu. Runs until the user picks "0. Exit".
pub fn main_menu(app: &App) -> Result<()> {
    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Menu")
            .items(&MENU)
            .default(1)
            .interact()?;
        debug!(choice, "menu selection");
        match choice {
            0 => {
                println!("bye!");
                break;
            }
            1 => list_movies(app),
            2 => add_movie(app)?,
            3 => delete_movie(app)?,
            4 => update_movie(app)?,
            5 => stats_movies(app),
            6 => random_movie(app),
            7 => search_movies(app)?,
            8 => sort_by_rating(app),
            9 => sort_by_year(app)?,
            10 => filter_movies(app)?,
            11 => generate_website(app),
            _ => println!("Invalid choice, please pick a number between 0 and 11."),
        }
        pause()?;
    }
    Ok(())
}

fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Press Enter to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

fn prompt(text: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(text)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Load the collection. Prints `empty_msg` (or the storage error) and
/// returns `None` when there is nothing to work with.
fn load(app: &App, empty_msg: &str) -> Option<MovieMap> {
    match app.storage.list() {
        Ok(movies) if movies.is_empty() => {
            println!("{}", empty_msg);
            None
        }
        Ok(movies) => Some(movies),
        Err(e) => {
            println!("Error: {}", e);
            None
        }
    }
}

fn print_row(title: &str, rec: &MovieRecord) {
    println!("- {} | {}", title, rec);
}

fn list_movies(app: &App) {
    let Some(movies) = load(app, "No movies in the database.") else {
        return;
    };
    println!("\n{} movies in total:", movies.len());
    for (title, rec) in &movies {
        print_row(title, rec);
    }
}

fn add_movie(app: &App) -> Result<()> {
    let title = prompt("Enter movie title")?;
    if title.is_empty() {
        println!("No title entered.");
        return Ok(());
    }

    let movies = match app.storage.list() {
        Ok(m) => m,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    if movies.contains_key(&title) {
        println!("Movie '{}' already exists!", title);
        return Ok(());
    }

    if !app.omdb.has_api_key() {
        println!("OMDb API key is not configured; set OMDB_API_KEY to add movies.");
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Looking up OMDb...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let looked_up = app.omdb.find(&title);
    spinner.finish_and_clear();

    let movie = match looked_up {
        Ok(movie) => movie,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };
    if movie.year.is_none() || movie.rating.is_none() {
        println!("Could not retrieve a valid year or rating from OMDb; movie not added.");
        return Ok(());
    }

    match app.storage.add(&movie) {
        Ok(()) => println!(
            "Movie '{}' ({}) added with rating {}.",
            movie.title,
            movie.year.unwrap_or_default(),
            movie.rating.unwrap_or_default()
        ),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn delete_movie(app: &App) -> Result<()> {
    let Some(movies) = load(app, "No movies to delete.") else {
        return Ok(());
    };
    let title = prompt("Enter movie name to delete")?;
    if !movies.contains_key(&title) {
        println!("Movie '{}' was not found.", title);
        return Ok(());
    }
    match app.storage.delete(&title) {
        Ok(()) => println!("Movie '{}' deleted.", title),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn update_movie(app: &App) -> Result<()> {
    let Some(movies) = load(app, "No movies to update.") else {
        return Ok(());
    };
    let title = prompt("Enter movie name to update")?;
    let Some(current) = movies.get(&title) else {
        println!("Movie '{}' was not found.", title);
        return Ok(());
    };
    println!("Current data: Title: {} | {}", title, current);

    let input = prompt("Enter new rating (0-10, press Enter to keep current)")?;
    let rating = match parse_optional_rating(&input) {
        Ok(Some(r)) => r,
        Ok(None) => {
            println!("No changes made.");
            return Ok(());
        }
        Err(e) => {
            println!("{}; keeping old rating.", e);
            return Ok(());
        }
    };

    match app.storage.update_rating(&title, rating) {
        Ok(()) => println!("Movie '{}' updated.", title),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn stats_movies(app: &App) {
    let Some(movies) = load(app, "No movies to calculate stats.") else {
        return;
    };
    let Some(stats) = RatingStats::compute(&movies) else {
        println!("No ratings available to calculate stats.");
        return;
    };
    println!("\nStats:");
    println!("Movies count: {}", stats.count);
    println!("Average rating: {:.2}", stats.mean);
    println!("Median rating: {:.2}", stats.median);
    println!(
        "Best movie(s): {} with rating {}",
        stats.best.titles.join(", "),
        stats.best.rating
    );
    println!(
        "Worst movie(s): {} with rating {}",
        stats.worst.titles.join(", "),
        stats.worst.rating
    );
}

fn random_movie(app: &App) {
    let Some(movies) = load(app, "No movies in the list.") else {
        return;
    };
    if let Some((title, rec)) = catalog::random_movie(&movies, &mut rand::thread_rng()) {
        println!("Random movie: {} | {}", title, rec);
    }
}

fn search_movies(app: &App) -> Result<()> {
    let Some(movies) = load(app, "No movies in the list.") else {
        return Ok(());
    };
    let needle = prompt("Enter part of the movie name")?;
    let found = catalog::search(&movies, &needle);
    if found.is_empty() {
        println!("No movies found containing '{}'.", needle);
    }
    for (title, rec) in found {
        print_row(title, rec);
    }
    Ok(())
}

fn sort_by_rating(app: &App) {
    let Some(movies) = load(app, "No movies in the list.") else {
        return;
    };
    let sorted = catalog::sorted_by_rating(&movies);
    if sorted.is_empty() {
        println!("No ratings available to sort.");
        return;
    }
    println!("\nMovies sorted by rating:");
    for (title, rating) in sorted {
        println!("{}: {}", title, rating);
    }
}

fn sort_by_year(app: &App) -> Result<()> {
    let Some(movies) = load(app, "No movies in the list.") else {
        return Ok(());
    };
    let latest_first = Confirm::new()
        .with_prompt("Do you want the latest movies first?")
        .default(LATEST_FIRST_DEFAULT)
        .interact()?;
    let sorted = catalog::sorted_by_year(&movies, latest_first);
    if sorted.is_empty() {
        println!("No years available to sort.");
        return Ok(());
    }
    println!("\nMovies sorted by year:");
    for (title, rec) in sorted {
        println!("{} ({}) | Rating: {}", title, rec.year_label(), rec.rating_label());
    }
    Ok(())
}

fn filter_movies(app: &App) -> Result<()> {
    let Some(movies) = load(app, "No movies in the list.") else {
        return Ok(());
    };

    let min_rating = prompt("Enter minimum rating (leave blank for no minimum rating)")?;
    let start_year = prompt("Enter start year (leave blank for no start year)")?;
    let end_year = prompt("Enter end year (leave blank for no end year)")?;

    let mut f = MovieFilter::default();
    match parse_optional_rating(&min_rating) {
        Ok(r) => f.min_rating = r,
        Err(e) => println!("{}; ignoring rating filter.", e),
    }
    match parse_optional_year(&start_year) {
        Ok(y) => f.start_year = y,
        Err(e) => println!("{}; ignoring start year filter.", e),
    }
    match parse_optional_year(&end_year) {
        Ok(y) => f.end_year = y,
        Err(e) => println!("{}; ignoring end year filter.", e),
    }

    let rows = catalog::filter(&movies, &f);
    if rows.is_empty() {
        println!("No movies match the filter.");
        return Ok(());
    }
    println!("\nFiltered movies:");
    for (title, rec) in rows {
        print_row(title, rec);
    }
    Ok(())
}

fn generate_website(app: &App) {
    let movies = match app.storage.list() {
        Ok(m) => m,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    match website::generate(&app.config.template_path, &app.config.output_path, &movies) {
        Ok(count) => println!(
            "Website with {} movies was generated at {}.",
            count,
            app.config.output_path.display()
        ),
        Err(e) => println!("Website generation failed: {}", e),
    }
}
