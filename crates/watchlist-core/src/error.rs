use thiserror::Error;
use watchlist_sources::SourceError;

/// Everything a watchlist operation can fail with
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Movie {0} already exists in the watchlist")]
    DuplicateEntry(String),

    #[error("Movie {0} is not in the watchlist")]
    NotFound(String),

    #[error("Movie database error: {0}")]
    Api(String),

    #[error("Unexpected movie database response: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request was abandoned, or a newer one replaced it
    #[error("Request cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type WatchlistResult<T> = Result<T, WatchlistError>;

impl WatchlistError {
    /// The single message shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            WatchlistError::DuplicateEntry(_) => "Movie already exists in the watchlist.".to_string(),
            WatchlistError::NotFound(_) => "Movie not found in the watchlist.".to_string(),
            WatchlistError::Api(message) => message.clone(),
            WatchlistError::Decode(_) => "The movie database sent a response we could not read.".to_string(),
            WatchlistError::InvalidInput(message) => message.clone(),
            WatchlistError::Cancelled => "Request cancelled.".to_string(),
            WatchlistError::Storage(message) => format!("Could not save the watchlist: {}", message),
        }
    }
}

impl From<SourceError> for WatchlistError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Api(message) => WatchlistError::Api(message),
            SourceError::InvalidInput(message) => WatchlistError::InvalidInput(message),
            SourceError::Decode { .. } => WatchlistError::Decode(err.to_string()),
            SourceError::Http { .. } | SourceError::Transport(_) => WatchlistError::Api(err.to_string()),
        }
    }
}
