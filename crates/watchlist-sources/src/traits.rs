use async_trait::async_trait;
use watchlist_models::{MovieDetails, SearchResultItem};
use crate::error::SourceError;

/// An external movie database the watchlist can search and import from
#[async_trait]
pub trait MovieDatabase: Send + Sync {
    // Source metadata
    fn source_name(&self) -> &str;

    /// Search titles; an empty result means the database found nothing
    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError>;

    /// Full details for one external id
    async fn fetch_details_by_id(&self, imdb_id: &str) -> Result<MovieDetails, SourceError>;
}
