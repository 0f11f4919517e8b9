use serde::{Deserialize, Serialize};

/// Label of the "no genre filter" option
pub const ALL_GENRES_LABEL: &str = "All";
/// Label of the favorites-only option
pub const FAVORITE_LABEL: &str = "Favorite";

/// Which slice of the collection the genre bar has selected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GenreSelection {
    #[default]
    All,
    Favorite,
    Genre(String),
}

impl GenreSelection {
    /// Map a genre-bar label back to a selection
    pub fn from_label(label: &str) -> Self {
        match label {
            ALL_GENRES_LABEL => GenreSelection::All,
            FAVORITE_LABEL => GenreSelection::Favorite,
            genre => GenreSelection::Genre(genre.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GenreSelection::All => ALL_GENRES_LABEL,
            GenreSelection::Favorite => FAVORITE_LABEL,
            GenreSelection::Genre(genre) => genre,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, GenreSelection::All)
    }
}
