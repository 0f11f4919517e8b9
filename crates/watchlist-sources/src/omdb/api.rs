use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use watchlist_models::{MediaType, MovieDetails, SearchResultItem};
use crate::error::SourceError;

/// Error text OMDb uses for "the search matched nothing"
const NOT_FOUND_ERROR: &str = "Movie not found!";
const GENRE_SEPARATOR: &str = ", ";
const MISSING_VALUE: &str = "N/A";

// Every OMDb response carries these two fields, success or not
#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbEnvelope {
    fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
    #[serde(rename = "Type")]
    media_type: MediaType,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults")]
    total_results: String,
}

#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster")]
    poster: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "Plot")]
    plot: String,
}

/// One page of search hits plus the total OMDb reports across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<SearchResultItem>,
    pub total_results: u32,
}

impl SearchPage {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_results: 0,
        }
    }
}

/// Split OMDb's comma-separated genre string, keeping the listed order
pub fn split_genres(genre: &str) -> Vec<String> {
    let genre = genre.trim();
    if genre.is_empty() || genre == MISSING_VALUE {
        return Vec::new();
    }
    genre
        .split(GENRE_SEPARATOR)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str, context: &'static str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|source| SourceError::Decode { context, source })
}

/// Decode a `?s=` response.
///
/// "Movie not found!" is a successful search with no hits; any other
/// `Response: False` is an API failure.
pub fn parse_search_response(body: &str) -> Result<SearchPage, SourceError> {
    let envelope: OmdbEnvelope = decode(body, "search")?;

    if !envelope.is_success() {
        return match envelope.error.as_deref() {
            Some(NOT_FOUND_ERROR) => Ok(SearchPage::empty()),
            Some(message) => Err(SourceError::Api(message.to_string())),
            None => Err(SourceError::Api("Search failed without an error message".to_string())),
        };
    }

    let response: OmdbSearchResponse = decode(body, "search")?;
    let items: Vec<SearchResultItem> = response
        .search
        .into_iter()
        .map(|item| SearchResultItem {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: item.poster,
            media_type: item.media_type,
        })
        .collect();

    let total_results = response
        .total_results
        .trim()
        .parse()
        .unwrap_or(items.len() as u32);

    Ok(SearchPage { items, total_results })
}

/// Decode a `?i=` response into movie details
pub fn parse_details_response(body: &str) -> Result<MovieDetails, SourceError> {
    let envelope: OmdbEnvelope = decode(body, "details")?;

    if !envelope.is_success() {
        let message = envelope
            .error
            .unwrap_or_else(|| "Details lookup failed without an error message".to_string());
        return Err(SourceError::Api(message));
    }

    let movie: OmdbMovie = decode(body, "details")?;
    Ok(MovieDetails {
        genres: split_genres(&movie.genre),
        imdb_id: movie.imdb_id,
        title: movie.title,
        poster: movie.poster,
        year: movie.year,
        plot: movie.plot,
    })
}

/// The `Error` text of a failure envelope, if `body` is one
fn envelope_error(body: &str) -> Option<String> {
    let envelope: OmdbEnvelope = serde_json::from_str(body).ok()?;
    if envelope.is_success() {
        return None;
    }
    envelope.error
}

async fn get_body(
    client: &Client,
    base_url: &str,
    params: &[(&str, &str)],
    what: &str,
) -> Result<String, SourceError> {
    let response = client
        .get(base_url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        debug!("OMDb {} request failed with status {}", what, status);
        // OMDb reports a bad key as 401 with its usual error envelope
        if status.is_client_error() {
            if let Some(message) = envelope_error(&error_text) {
                return Err(SourceError::Api(message));
            }
        }
        return Err(SourceError::Http {
            status: status.as_u16(),
            body: error_text,
        });
    }

    Ok(response.text().await?)
}

/// Search OMDb for movies whose title matches `query`
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<SearchPage, SourceError> {
    debug!("Searching OMDb for '{}'", query);
    let body = get_body(
        client,
        base_url,
        &[("s", query), ("apikey", api_key), ("type", "movie")],
        "search",
    )
    .await?;
    parse_search_response(&body)
}

/// Fetch full details for one IMDb id
pub async fn get_movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetails, SourceError> {
    debug!("Fetching OMDb details for {}", imdb_id);
    let body = get_body(client, base_url, &[("i", imdb_id), ("apikey", api_key)], "details").await?;
    parse_details_response(&body)
}
