use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use watchlist_models::MovieRecord;
use crate::filter::{filter_movies, MovieFilter};

/// The three curated rows shown on the unfiltered home screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeSections {
    pub todays_picks: Vec<MovieRecord>,
    pub for_you: Vec<MovieRecord>,
    pub best_this_year: Vec<MovieRecord>,
}

impl HomeSections {
    /// (title, movies) pairs in display order
    pub fn rows(&self) -> [(&'static str, &[MovieRecord]); 3] {
        [
            ("Today's Picks", self.todays_picks.as_slice()),
            ("For You", self.for_you.as_slice()),
            ("Best This Year", self.best_this_year.as_slice()),
        ]
    }
}

/// What the library screen should render for a given filter
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryView {
    Sections(HomeSections),
    Grid(Vec<MovieRecord>),
    /// A filter is active and nothing matched
    Empty,
}

fn shuffled<R: Rng + ?Sized>(movies: &[MovieRecord], size: usize, rng: &mut R) -> Vec<MovieRecord> {
    let mut picks = movies.to_vec();
    picks.shuffle(rng);
    picks.truncate(size);
    picks
}

/// Two independent shuffles plus the newest titles. Records without a
/// numeric year sort after every dated one.
pub fn build_sections<R: Rng + ?Sized>(
    movies: &[MovieRecord],
    section_size: usize,
    rng: &mut R,
) -> HomeSections {
    let mut best_this_year = shuffled(movies, movies.len(), rng);
    // Stable sort keeps the shuffle order among equal years
    best_this_year.sort_by_key(|movie| Reverse(movie.numeric_year().map(|year| year as i64).unwrap_or(-1)));
    best_this_year.truncate(section_size);

    HomeSections {
        todays_picks: shuffled(movies, section_size, rng),
        for_you: shuffled(movies, section_size, rng),
        best_this_year,
    }
}

pub fn library_view<R: Rng + ?Sized>(
    movies: &[MovieRecord],
    filter: &MovieFilter,
    section_size: usize,
    rng: &mut R,
) -> LibraryView {
    if filter.is_unfiltered() {
        return LibraryView::Sections(build_sections(movies, section_size, rng));
    }

    let matches: Vec<MovieRecord> = filter_movies(movies, filter).into_iter().cloned().collect();
    if matches.is_empty() {
        LibraryView::Empty
    } else {
        LibraryView::Grid(matches)
    }
}
