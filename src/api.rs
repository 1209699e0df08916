// API client module: a small blocking HTTP client for the OMDb movie
// metadata service. One GET per lookup; the response is normalized into
// our own `Movie` shape before it reaches storage.

use crate::error::LookupError;
use crate::movie::{is_valid_rating, Movie};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking OMDb client: reqwest client, endpoint and API key.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Raw OMDb payload. OMDb reports everything as strings, including
/// "N/A" for unknown values and "False" in `Response` for misses.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct OmdbResponse {
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(OmdbClient {
            client,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look a title up. `Ok(None)` means OMDb answered but does not know
    /// the title.
    pub fn lookup(&self, title: &str) -> Result<Option<Movie>, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::MissingApiKey)?;

        debug!(title, url = %self.base_url, "querying OMDb");
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", api_key), ("t", title)])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                // the request URL carries the API key
                let e = e.without_url();
                warn!(error = %e, "OMDb request failed");
                LookupError::Unreachable(e)
            })?;

        let body: OmdbResponse = res
            .json()
            .map_err(|e| LookupError::Decode(e.without_url()))?;
        Ok(body.into_movie(title))
    }

    /// Like [`lookup`](Self::lookup), but a miss is an error too.
    pub fn find(&self, title: &str) -> Result<Movie, LookupError> {
        self.lookup(title)?
            .ok_or_else(|| LookupError::NotFound(title.to_string()))
    }
}

impl OmdbResponse {
    pub fn is_not_found(&self) -> bool {
        self.response
            .as_deref()
            .map(|r| r.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
    }

    /// Normalize into a `Movie`. Malformed year or rating become `None`.
    pub fn into_movie(self, queried_title: &str) -> Option<Movie> {
        if self.is_not_found() {
            debug!(
                title = queried_title,
                reason = self.error.as_deref().unwrap_or(""),
                "OMDb has no match"
            );
            return None;
        }

        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| queried_title.to_string());

        Some(Movie {
            title,
            year: self.year.as_deref().and_then(normalize_year),
            rating: self.imdb_rating.as_deref().and_then(normalize_rating),
            poster_url: self.poster.and_then(present),
        })
    }
}

fn normalize_year(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn normalize_rating(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| is_valid_rating(*r))
}

fn present(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("N/A") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    fn parse(json: &str) -> OmdbResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn found_movie_is_normalized() {
        let body = parse(
            r#"{"Title":"Inception","Year":"2010","imdbRating":"8.8",
                "Poster":"https://example.com/inception.jpg","Response":"True"}"#,
        );
        let movie = body.into_movie("inception").unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year, Some(2010));
        assert_eq!(movie.rating, Some(8.8));
        assert_eq!(movie.poster_url.as_deref(), Some("https://example.com/inception.jpg"));
    }

    #[test]
    fn not_found_response_is_empty() {
        let body = parse(r#"{"Response":"False","Error":"Movie not found!"}"#);
        assert!(body.into_movie("nope").is_none());
    }

    #[test]
    fn malformed_year_and_rating_become_absent() {
        let body = parse(
            r#"{"Title":"Sherlock","Year":"2010–2017","imdbRating":"N/A",
                "Poster":"N/A","Response":"True"}"#,
        );
        let movie = body.into_movie("sherlock").unwrap();
        assert_eq!(movie.year, None);
        assert_eq!(movie.rating, None);
        assert_eq!(movie.poster_url, None);
    }

    #[test]
    fn rating_outside_range_is_dropped() {
        assert_eq!(normalize_rating("42"), None);
        assert_eq!(normalize_rating("7.1"), Some(7.1));
        assert_eq!(normalize_rating("abc"), None);
    }

    #[test]
    fn missing_title_falls_back_to_query() {
        let body = parse(r#"{"Year":"1999","Response":"True"}"#);
        let movie = body.into_movie("The Matrix").unwrap();
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.year, Some(1999));
    }

    #[test]
    fn lookup_without_key_fails_before_any_request() {
        let client = OmdbClient::new("http://127.0.0.1:1/", Some("  ".into())).unwrap();
        assert!(!client.has_api_key());
        assert!(matches!(client.lookup("Heat"), Err(LookupError::MissingApiKey)));
    }

    /// Answer exactly one request with `status` and `body`; the handle
    /// yields the request line that was received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header.trim().is_empty() {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request_line.trim().to_string()
        });
        (url, handle)
    }

    #[test]
    fn lookup_sends_key_and_title_as_query() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"Title":"Heat","Year":"1995","imdbRating":"8.3","Poster":"N/A","Response":"True"}"#,
        );
        let client = OmdbClient::new(url, Some("k".into())).unwrap();
        let movie = client.find("Heat").unwrap();
        assert_eq!(movie, Movie::new("Heat", Some(1995), Some(8.3)));
        assert_eq!(server.join().unwrap(), "GET /?apikey=k&t=Heat HTTP/1.1");
    }

    #[test]
    fn find_maps_false_response_to_not_found() {
        let (url, server) = serve_once("200 OK", r#"{"Response":"False","Error":"Movie not found!"}"#);
        let client = OmdbClient::new(url, Some("k".into())).unwrap();
        let err = client.find("Zzz Nope").unwrap_err();
        assert!(matches!(err, LookupError::NotFound(ref t) if t == "Zzz Nope"));
        assert!(server.join().unwrap().starts_with("GET /?apikey=k&t=Zzz+Nope "));
    }

    #[test]
    fn server_error_is_unreachable_and_hides_key() {
        let (url, server) = serve_once("500 Internal Server Error", "{}");
        let client = OmdbClient::new(url, Some("secret-key".into())).unwrap();
        let err = client.lookup("Heat").unwrap_err();
        assert!(matches!(err, LookupError::Unreachable(_)));
        assert!(!err.to_string().contains("secret-key"), "{}", err);
        server.join().unwrap();
    }

    #[test]
    fn undecodable_body_is_decode_error_and_hides_key() {
        let (url, server) = serve_once("200 OK", "not json");
        let client = OmdbClient::new(url, Some("secret-key".into())).unwrap();
        let err = client.lookup("Heat").unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
        assert!(!err.to_string().contains("secret-key"), "{}", err);
        server.join().unwrap();
    }

    #[test]
    fn closed_port_is_reported_as_unreachable() {
        let client = OmdbClient::new("http://127.0.0.1:1/", Some("key".into())).unwrap();
        let err = client.lookup("Heat").unwrap_err();
        assert!(matches!(err, LookupError::Unreachable(_)));
        assert!(!err.to_string().contains("apikey"), "{}", err);
        assert!(matches!(client.find("Heat"), Err(LookupError::Unreachable(_))));
    }
}
