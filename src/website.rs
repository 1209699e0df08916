// Static gallery generation: fill the two placeholders of an HTML
// template and write the result out.

use crate::error::WebsiteError;
use crate::movie::MovieMap;
use std::path::Path;
use tracing::info;

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";
pub const SITE_TITLE: &str = "My Movie App";

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn movie_card(title: &str, year: &str, poster_url: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<li>
    <div class="movie">
        <img class="movie-poster" src="{poster}" alt="{title} poster">
        <div class="movie-title">{title}</div>
        <div class="movie-year">{year}</div>
    </div>
</li>"#,
        poster = escape_html(poster_url),
        title = title,
        year = escape_html(year),
    )
}

/// Substitute the page title and the movie grid into `template`.
pub fn render(template: &str, movies: &MovieMap) -> String {
    let grid = movies
        .iter()
        .map(|(title, rec)| {
            movie_card(
                title,
                &rec.year_label(),
                rec.poster_url.as_deref().unwrap_or(""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    template
        .replace(TITLE_PLACEHOLDER, SITE_TITLE)
        .replace(GRID_PLACEHOLDER, &grid)
}

/// Render `movies` into `output_path`. Returns how many cards were written.
pub fn generate(
    template_path: &Path,
    output_path: &Path,
    movies: &MovieMap,
) -> Result<usize, WebsiteError> {
    if movies.is_empty() {
        return Err(WebsiteError::NoMovies);
    }
    if !template_path.is_file() {
        return Err(WebsiteError::TemplateNotFound(template_path.to_path_buf()));
    }

    let template = std::fs::read_to_string(template_path)?;
    std::fs::write(output_path, render(&template, movies))?;
    info!(
        output = %output_path.display(),
        count = movies.len(),
        "website generated"
    );
    Ok(movies.len())
}
