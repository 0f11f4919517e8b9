use std::collections::{BTreeMap, HashSet};
use tracing::debug;
use watchlist_models::{MovieMutation, MovieRecord};
use crate::error::{WatchlistError, WatchlistResult};

/// Keyed storage of watchlist entries.
///
/// At most one record per `imdb_id`. `update` is the only way a stored
/// record changes, and it only touches the favorite flag and comment.
pub trait MovieRepository: Send {
    /// Store a new record; fails with `DuplicateEntry` if the id is taken
    fn insert(&mut self, record: MovieRecord) -> WatchlistResult<()>;

    /// Apply a mutation to an existing record and return the result
    fn update(&mut self, imdb_id: &str, mutation: MovieMutation) -> WatchlistResult<MovieRecord>;

    fn remove(&mut self, imdb_id: &str) -> WatchlistResult<MovieRecord>;

    fn get(&self, imdb_id: &str) -> Option<&MovieRecord>;

    /// Every stored record, ordered by id
    fn list_all(&self) -> Vec<MovieRecord>;

    fn len(&self) -> usize;

    fn exists(&self, imdb_id: &str) -> bool {
        self.get(imdb_id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `defaults` only when nothing is stored yet. Returns how many were inserted.
    fn seed_if_empty(&mut self, defaults: Vec<MovieRecord>) -> WatchlistResult<usize> {
        if !self.is_empty() {
            return Ok(0);
        }
        // All or nothing: reject the batch before touching the store
        ensure_unique_ids(&defaults)?;
        let count = defaults.len();
        for record in defaults {
            self.insert(record)?;
        }
        Ok(count)
    }
}

/// Fails with `DuplicateEntry` on the first id that appears twice in `records`
pub(crate) fn ensure_unique_ids(records: &[MovieRecord]) -> WatchlistResult<()> {
    let mut seen = HashSet::new();
    match records.iter().find(|record| !seen.insert(record.imdb_id.as_str())) {
        Some(duplicate) => Err(WatchlistError::DuplicateEntry(duplicate.imdb_id.clone())),
        None => Ok(()),
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    records: BTreeMap<String, MovieRecord>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<MovieRecord>) -> WatchlistResult<Self> {
        let mut repository = Self::new();
        for record in records {
            repository.insert(record)?;
        }
        Ok(repository)
    }

    pub(crate) fn records(&self) -> &BTreeMap<String, MovieRecord> {
        &self.records
    }
}

impl MovieRepository for InMemoryRepository {
    fn insert(&mut self, record: MovieRecord) -> WatchlistResult<()> {
        if self.records.contains_key(&record.imdb_id) {
            return Err(WatchlistError::DuplicateEntry(record.imdb_id));
        }
        debug!("Inserting {} ({})", record.title, record.imdb_id);
        self.records.insert(record.imdb_id.clone(), record);
        Ok(())
    }

    fn update(&mut self, imdb_id: &str, mutation: MovieMutation) -> WatchlistResult<MovieRecord> {
        let record = self
            .records
            .get_mut(imdb_id)
            .ok_or_else(|| WatchlistError::NotFound(imdb_id.to_string()))?;
        record.apply(mutation);
        Ok(record.clone())
    }

    fn remove(&mut self, imdb_id: &str) -> WatchlistResult<MovieRecord> {
        self.records
            .remove(imdb_id)
            .ok_or_else(|| WatchlistError::NotFound(imdb_id.to_string()))
    }

    fn get(&self, imdb_id: &str) -> Option<&MovieRecord> {
        self.records.get(imdb_id)
    }

    fn list_all(&self) -> Vec<MovieRecord> {
        self.records.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlist_models::sample_movies;

    fn record(id: &str, title: &str) -> MovieRecord {
        MovieRecord::new(id, "", title, "2008", vec!["Drama".to_string()], "")
    }

    #[test]
    fn test_insert_and_get() {
        let mut repo = InMemoryRepository::new();
        repo.insert(record("tt0468569", "The Dark Knight")).unwrap();

        assert!(repo.exists("tt0468569"));
        assert_eq!(repo.get("tt0468569").unwrap().title, "The Dark Knight");
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_leaves_existing_untouched() {
        let mut repo = InMemoryRepository::new();
        repo.insert(record("tt0468569", "The Dark Knight").with_comment("mine")).unwrap();

        let err = repo.insert(record("tt0468569", "Impostor")).unwrap_err();
        assert!(matches!(err, WatchlistError::DuplicateEntry(ref id) if id == "tt0468569"));

        let stored = repo.get("tt0468569").unwrap();
        assert_eq!(stored.title, "The Dark Knight");
        assert_eq!(stored.comment.as_deref(), Some("mine"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut repo = InMemoryRepository::new();
        let err = repo.update("tt0000000", MovieMutation::ToggleFavorite).unwrap_err();
        assert!(matches!(err, WatchlistError::NotFound(_)));
    }

    #[test]
    fn test_update_only_touches_mutable_fields() {
        let mut repo = InMemoryRepository::new();
        let original = record("tt0468569", "The Dark Knight");
        repo.insert(original.clone()).unwrap();

        let updated = repo
            .update("tt0468569", MovieMutation::SetComment(Some("again".to_string())))
            .unwrap();
        let updated = repo.update(&updated.imdb_id, MovieMutation::ToggleFavorite).unwrap();

        assert!(updated.is_favorite);
        assert_eq!(updated.comment.as_deref(), Some("again"));
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.genres, original.genres);
        assert_eq!(updated.date_added, original.date_added);
    }

    #[test]
    fn test_remove() {
        let mut repo = InMemoryRepository::from_records(vec![record("tt1", "One")]).unwrap();
        assert_eq!(repo.remove("tt1").unwrap().title, "One");
        assert!(repo.is_empty());
        assert!(matches!(repo.remove("tt1"), Err(WatchlistError::NotFound(_))));
    }

    #[test]
    fn test_seed_if_empty_is_idempotent() {
        let mut repo = InMemoryRepository::new();
        assert_eq!(repo.seed_if_empty(sample_movies()).unwrap(), 12);
        assert_eq!(repo.seed_if_empty(sample_movies()).unwrap(), 0);
        assert_eq!(repo.len(), 12);
    }

    #[test]
    fn test_seed_with_repeated_id_inserts_nothing() {
        let mut repo = InMemoryRepository::new();
        let err = repo
            .seed_if_empty(vec![record("tt1", "One"), record("tt2", "Two"), record("tt1", "Again")])
            .unwrap_err();
        assert!(matches!(err, WatchlistError::DuplicateEntry(ref id) if id == "tt1"));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_seed_skipped_when_not_empty() {
        let mut repo = InMemoryRepository::from_records(vec![record("tt1", "One")]).unwrap();
        assert_eq!(repo.seed_if_empty(sample_movies()).unwrap(), 0);
        assert_eq!(repo.list_all().len(), 1);
    }
}
