use std::collections::BTreeSet;
use watchlist_models::{GenreSelection, MovieRecord, ALL_GENRES_LABEL, FAVORITE_LABEL};

/// What the library view is currently narrowed to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub selection: GenreSelection,
    pub query: String,
}

impl MovieFilter {
    pub fn new(selection: GenreSelection, query: impl Into<String>) -> Self {
        Self {
            selection,
            query: query.into(),
        }
    }

    /// Build from a genre-bar label ("All", "Favorite" or a genre name)
    pub fn from_label(label: &str, query: impl Into<String>) -> Self {
        Self::new(GenreSelection::from_label(label), query)
    }

    pub fn favorites_only() -> Self {
        Self::new(GenreSelection::Favorite, "")
    }

    /// The trimmed query, or `None` when it is blank
    pub fn normalized_query(&self) -> Option<&str> {
        let query = self.query.trim();
        (!query.is_empty()).then_some(query)
    }

    /// No genre chosen and no text typed
    pub fn is_unfiltered(&self) -> bool {
        self.selection.is_all() && self.normalized_query().is_none()
    }

    pub fn matches(&self, movie: &MovieRecord) -> bool {
        match &self.selection {
            // Favorites ignore every other criterion
            GenreSelection::Favorite => return movie.is_favorite,
            GenreSelection::Genre(genre) if !movie.has_genre(genre) => return false,
            _ => {}
        }
        match self.normalized_query() {
            Some(query) => title_contains(&movie.title, query),
            None => true,
        }
    }
}

fn title_contains(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

/// The records `filter` keeps, in their original order
pub fn filter_movies<'a>(movies: &'a [MovieRecord], filter: &MovieFilter) -> Vec<&'a MovieRecord> {
    movies.iter().filter(|movie| filter.matches(movie)).collect()
}

/// Genre-bar labels: "All", optionally "Favorite", then every genre in the
/// collection sorted and deduplicated
pub fn genre_options(movies: &[MovieRecord], include_favorite: bool) -> Vec<String> {
    let genres: BTreeSet<&str> = movies
        .iter()
        .flat_map(|movie| movie.genres.iter().map(String::as_str))
        .collect();

    let mut options = vec![ALL_GENRES_LABEL.to_string()];
    if include_favorite {
        options.push(FAVORITE_LABEL.to_string());
    }
    options.extend(genres.into_iter().map(str::to_string));
    options
}
