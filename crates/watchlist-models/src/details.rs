use serde::{Deserialize, Serialize};

/// Full details for one title, as fetched from the movie database
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub poster: String,
    pub year: String,
    pub genres: Vec<String>, // Already split, in the order the database lists them
    pub plot: String,
}
