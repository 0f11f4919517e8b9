pub mod controller;
pub mod error;
pub mod filter;
pub mod repository;
pub mod sections;
pub mod state;
pub mod store;
pub mod tracker;

pub use controller::WatchlistController;
pub use error::{WatchlistError, WatchlistResult};
pub use filter::{filter_movies, genre_options, MovieFilter};
pub use repository::{InMemoryRepository, MovieRepository};
pub use sections::{build_sections, library_view, HomeSections, LibraryView};
pub use state::SearchState;
pub use store::JsonFileRepository;
pub use tracker::{CancelHandle, RequestTracker};
