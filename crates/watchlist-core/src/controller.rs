use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};
use watchlist_models::{sample_movies, MovieMutation, MovieRecord, SearchResultItem};
use watchlist_sources::MovieDatabase;
use crate::error::{WatchlistError, WatchlistResult};
use crate::filter::{filter_movies, genre_options, MovieFilter};
use crate::repository::MovieRepository;
use crate::sections::{library_view, LibraryView};
use crate::tracker::{CancelHandle, RequestTracker};

/// Coordinates user intents against the movie database and the repository.
///
/// Network calls go through a [`RequestTracker`], so a new search or a
/// cancel abandons whatever request was still running.
pub struct WatchlistController<D, R> {
    database: Arc<D>,
    repository: R,
    tracker: Arc<RequestTracker>,
}

impl<D, R> WatchlistController<D, R>
where
    D: MovieDatabase + 'static,
    R: MovieRepository,
{
    pub fn new(database: Arc<D>, repository: R) -> Self {
        Self {
            database,
            repository,
            tracker: Arc::new(RequestTracker::new()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(Arc::clone(&self.tracker))
    }

    /// Title search; an empty or whitespace query never reaches the network
    pub async fn search(&self, query: &str) -> WatchlistResult<Vec<SearchResultItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WatchlistError::InvalidInput("Please enter a movie name.".to_string()));
        }

        let database = Arc::clone(&self.database);
        let query = query.to_string();
        self.tracker
            .run(async move { database.search_by_title(&query).await })
            .await
    }

    /// Fetch details for a chosen search hit and store it.
    ///
    /// Already-stored ids fail with `DuplicateEntry` before any request is made.
    pub async fn add_from_search_result(
        &mut self,
        item: &SearchResultItem,
        comment: Option<String>,
    ) -> WatchlistResult<MovieRecord> {
        if self.repository.exists(&item.imdb_id) {
            return Err(WatchlistError::DuplicateEntry(item.imdb_id.clone()));
        }

        let database = Arc::clone(&self.database);
        let imdb_id = item.imdb_id.clone();
        let details = self
            .tracker
            .run(async move { database.fetch_details_by_id(&imdb_id).await })
            .await?;

        if details.imdb_id != item.imdb_id {
            warn!(
                "{} returned {} for requested id {}",
                self.database.source_name(),
                details.imdb_id,
                item.imdb_id
            );
        }

        let record = MovieRecord::from_details(details, comment);
        self.repository.insert(record.clone())?;
        info!("Added {} ({}) to the watchlist", record.title, record.imdb_id);
        Ok(record)
    }

    pub fn toggle_favorite(&mut self, imdb_id: &str) -> WatchlistResult<MovieRecord> {
        let record = self.repository.update(imdb_id, MovieMutation::ToggleFavorite)?;
        info!("{} favorite: {}", record.title, record.is_favorite);
        Ok(record)
    }

    pub fn set_favorite(&mut self, imdb_id: &str, value: bool) -> WatchlistResult<MovieRecord> {
        let record = self.repository.update(imdb_id, MovieMutation::SetFavorite(value))?;
        info!("{} favorite: {}", record.title, record.is_favorite);
        Ok(record)
    }

    /// Replace the comment; blank text clears it
    pub fn set_comment(&mut self, imdb_id: &str, comment: Option<String>) -> WatchlistResult<MovieRecord> {
        self.repository.update(imdb_id, MovieMutation::SetComment(comment))
    }

    pub fn remove(&mut self, imdb_id: &str) -> WatchlistResult<MovieRecord> {
        let record = self.repository.remove(imdb_id)?;
        info!("Removed {} ({}) from the watchlist", record.title, record.imdb_id);
        Ok(record)
    }

    pub fn get(&self, imdb_id: &str) -> WatchlistResult<MovieRecord> {
        self.repository
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| WatchlistError::NotFound(imdb_id.to_string()))
    }

    pub fn movies(&self) -> Vec<MovieRecord> {
        self.repository.list_all()
    }

    pub fn filtered(&self, filter: &MovieFilter) -> Vec<MovieRecord> {
        let movies = self.repository.list_all();
        filter_movies(&movies, filter).into_iter().cloned().collect()
    }

    pub fn genre_options(&self, include_favorite: bool) -> Vec<String> {
        genre_options(&self.repository.list_all(), include_favorite)
    }

    pub fn library_view<G: Rng + ?Sized>(
        &self,
        filter: &MovieFilter,
        section_size: usize,
        rng: &mut G,
    ) -> LibraryView {
        library_view(&self.repository.list_all(), filter, section_size, rng)
    }

    /// Insert the default collection if the watchlist has never had anything in it
    pub fn seed_defaults(&mut self) -> WatchlistResult<usize> {
        self.repository.seed_if_empty(sample_movies())
    }
}
