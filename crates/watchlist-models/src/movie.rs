use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::details::MovieDetails;

/// A movie saved to the watchlist.
///
/// Identity is `imdb_id`. Only `comment` and `is_favorite` change after the
/// record is created; everything else is whatever the movie database returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub imdb_id: String,
    pub poster: String,
    pub title: String,
    pub year: String,
    pub genres: Vec<String>,
    pub plot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default = "Utc::now")]
    pub date_added: DateTime<Utc>,
}

/// The mutations a stored record accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieMutation {
    ToggleFavorite,
    SetFavorite(bool),
    SetComment(Option<String>),
}

impl MovieRecord {
    pub fn new(
        imdb_id: impl Into<String>,
        poster: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        genres: Vec<String>,
        plot: impl Into<String>,
    ) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            poster: poster.into(),
            title: title.into(),
            year: year.into(),
            genres,
            plot: plot.into(),
            comment: None,
            is_favorite: false,
            date_added: Utc::now(),
        }
    }

    /// Build a fresh (non-favorite) record from fetched details
    pub fn from_details(details: MovieDetails, comment: Option<String>) -> Self {
        let mut record = Self::new(
            details.imdb_id,
            details.poster,
            details.title,
            details.year,
            details.genres,
            details.plot,
        );
        record.comment = normalize_comment(comment);
        record
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = normalize_comment(Some(comment.into()));
        self
    }

    pub fn apply(&mut self, mutation: MovieMutation) {
        match mutation {
            MovieMutation::ToggleFavorite => self.is_favorite = !self.is_favorite,
            MovieMutation::SetFavorite(value) => self.is_favorite = value,
            MovieMutation::SetComment(comment) => self.comment = normalize_comment(comment),
        }
    }

    /// Exact, case-sensitive genre membership
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Leading numeric part of `year` ("2019–2022" -> 2019), if any
    pub fn numeric_year(&self) -> Option<u32> {
        let digits: String = self
            .year
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

/// Blank comments are stored as no comment at all
pub fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_record() -> MovieRecord {
        MovieRecord::new(
            "tt0468569",
            "https://example.com/poster.jpg",
            "The Dark Knight",
            "2008",
            vec!["Action".to_string(), "Crime".to_string(), "Drama".to_string()],
            "Batman faces the Joker.",
        )
    }

    #[test]
    fn test_new_record_is_not_favorite() {
        let record = create_record();
        assert!(!record.is_favorite);
        assert_eq!(record.comment, None);
    }

    #[test]
    fn test_toggle_favorite_twice_restores_value() {
        let mut record = create_record();
        record.apply(MovieMutation::ToggleFavorite);
        assert!(record.is_favorite);
        record.apply(MovieMutation::ToggleFavorite);
        assert!(!record.is_favorite);
    }

    #[test]
    fn test_set_comment_normalizes_blank() {
        let mut record = create_record();
        record.apply(MovieMutation::SetComment(Some("  Rewatch soon  ".to_string())));
        assert_eq!(record.comment.as_deref(), Some("Rewatch soon"));

        record.apply(MovieMutation::SetComment(Some("   ".to_string())));
        assert_eq!(record.comment, None);
    }

    #[test]
    fn test_has_genre_is_case_sensitive() {
        let record = create_record();
        assert!(record.has_genre("Crime"));
        assert!(!record.has_genre("crime"));
    }

    #[test]
    fn test_numeric_year() {
        let mut record = create_record();
        assert_eq!(record.numeric_year(), Some(2008));

        record.year = "2019–2022".to_string();
        assert_eq!(record.numeric_year(), Some(2019));

        record.year = "N/A".to_string();
        assert_eq!(record.numeric_year(), None);
    }

    #[test]
    fn test_from_details() {
        let details = MovieDetails {
            imdb_id: "tt0133093".to_string(),
            title: "The Matrix".to_string(),
            poster: "N/A".to_string(),
            year: "1999".to_string(),
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            plot: "A hacker learns the truth.".to_string(),
        };
        let record = MovieRecord::from_details(details, Some("Classic".to_string()));
        assert_eq!(record.imdb_id, "tt0133093");
        assert_eq!(record.genres, vec!["Action", "Sci-Fi"]);
        assert_eq!(record.comment.as_deref(), Some("Classic"));
        assert!(!record.is_favorite);
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{
            "imdb_id": "tt0111161",
            "poster": "",
            "title": "The Shawshank Redemption",
            "year": "1994",
            "genres": ["Drama"],
            "plot": ""
        }"#;
        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_favorite);
        assert_eq!(record.comment, None);
    }
}
