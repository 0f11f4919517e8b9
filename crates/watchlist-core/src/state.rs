use watchlist_models::SearchResultItem;
use crate::error::WatchlistError;

/// Observable state of the add-movie search screen.
///
/// Transitions return a new value; the old one is never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub selected: Option<SearchResultItem>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A search was submitted. Previous results stay visible until it resolves.
    pub fn begin(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: self.results.clone(),
            is_loading: true,
            error_message: None,
            selected: None,
        }
    }

    pub fn resolve(&self, outcome: Result<Vec<SearchResultItem>, WatchlistError>) -> Self {
        let mut next = Self {
            is_loading: false,
            ..self.clone()
        };
        match outcome {
            Ok(results) => {
                next.results = results;
                next.error_message = None;
            }
            // A superseded request says nothing about the current one
            Err(WatchlistError::Cancelled) => {}
            Err(e) => next.error_message = Some(e.user_message()),
        }
        next
    }

    /// Pick one of the current results by position
    pub fn select(&self, index: usize) -> Option<Self> {
        let item = self.results.get(index)?.clone();
        Some(Self {
            selected: Some(item),
            ..self.clone()
        })
    }

    /// Back to the initial state, e.g. after a successful add
    pub fn reset() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlist_models::MediaType;

    fn item(id: &str) -> SearchResultItem {
        SearchResultItem {
            imdb_id: id.to_string(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            poster: "N/A".to_string(),
            media_type: MediaType::Movie,
        }
    }

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let failed = SearchState::new()
            .begin("heat")
            .resolve(Err(WatchlistError::Api("Invalid API key!".to_string())));
        assert!(failed.error_message.is_some());
        let loading = failed.begin("heat");
        assert!(loading.is_loading);
        assert_eq!(loading.error_message, None);
        assert_eq!(loading.query, "heat");
    }

    #[test]
    fn test_resolve_success() {
        let state = SearchState::new().begin("heat").resolve(Ok(vec![item("tt0113277")]));
        assert!(!state.is_loading);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_resolve_error_keeps_previous_results() {
        let state = SearchState::new()
            .begin("heat")
            .resolve(Ok(vec![item("tt0113277")]))
            .begin("heat 2")
            .resolve(Err(WatchlistError::Api("Request limit reached!".to_string())));
        assert!(!state.is_loading);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.error_message.as_deref(), Some("Request limit reached!"));
    }

    #[test]
    fn test_resolve_cancelled_sets_no_error() {
        let state = SearchState::new().begin("heat").resolve(Err(WatchlistError::Cancelled));
        assert!(!state.is_loading);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_select() {
        let state = SearchState::new().begin("heat").resolve(Ok(vec![item("tt0113277")]));
        assert_eq!(state.select(0).unwrap().selected, Some(item("tt0113277")));
        assert!(state.select(1).is_none());
        assert_eq!(SearchState::reset(), SearchState::default());
    }
}
