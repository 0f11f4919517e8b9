use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use watchlist_models::{MovieMutation, MovieRecord};
use crate::error::{WatchlistError, WatchlistResult};
use crate::repository::{InMemoryRepository, MovieRepository};

/// Watchlist persisted as a JSON object keyed by IMDb id.
///
/// Every successful mutation is written through to disk. If the write fails
/// the in-memory change is rolled back so memory and disk never disagree.
pub struct JsonFileRepository {
    path: PathBuf,
    inner: InMemoryRepository,
}

impl JsonFileRepository {
    /// Open the store at `path`. A missing file is an empty watchlist; an
    /// unreadable one is backed up to `<path>.bak` and replaced by an empty one.
    pub fn open(path: impl Into<PathBuf>) -> WatchlistResult<Self> {
        let path = path.into();
        let inner = Self::load(&path)?;
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> WatchlistResult<InMemoryRepository> {
        if !path.exists() {
            debug!("No watchlist file at {}, starting empty", path.display());
            return Ok(InMemoryRepository::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| storage_error(path, e))?;
        let entries: BTreeMap<String, MovieRecord> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                let backup_path = backup_path(path);
                if let Err(backup_err) = std::fs::copy(path, &backup_path) {
                    warn!(
                        "Watchlist file {} is unreadable ({}) and could not be backed up: {}. Starting empty.",
                        path.display(),
                        e,
                        backup_err
                    );
                } else {
                    warn!(
                        "Watchlist file {} is unreadable ({}). Backed it up to {} and starting empty.",
                        path.display(),
                        e,
                        backup_path.display()
                    );
                }
                return Ok(InMemoryRepository::new());
            }
        };

        let mut repository = InMemoryRepository::new();
        for (key, record) in entries {
            if key != record.imdb_id {
                warn!("Watchlist entry '{}' holds record {}; keeping the record id", key, record.imdb_id);
            }
            if let Err(e) = repository.insert(record) {
                warn!("Skipping watchlist entry '{}': {}", key, e);
            }
        }

        info!("Loaded {} movies from {}", repository.len(), path.display());
        Ok(repository)
    }

    fn flush(&self) -> WatchlistResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }

        let content = serde_json::to_string_pretty(self.inner.records())
            .map_err(|e| WatchlistError::Storage(format!("could not encode watchlist: {}", e)))?;

        // Write to a sibling temp file, then rename over the old one
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(|e| storage_error(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| storage_error(&self.path, e))?;

        debug!("Saved {} movies to {}", self.inner.len(), self.path.display());
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn storage_error(path: &Path, err: std::io::Error) -> WatchlistError {
    WatchlistError::Storage(format!("{}: {}", path.display(), err))
}

impl MovieRepository for JsonFileRepository {
    fn insert(&mut self, record: MovieRecord) -> WatchlistResult<()> {
        let imdb_id = record.imdb_id.clone();
        self.inner.insert(record)?;
        if let Err(e) = self.flush() {
            let _ = self.inner.remove(&imdb_id);
            return Err(e);
        }
        Ok(())
    }

    fn update(&mut self, imdb_id: &str, mutation: MovieMutation) -> WatchlistResult<MovieRecord> {
        let previous = self
            .inner
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| WatchlistError::NotFound(imdb_id.to_string()))?;
        let updated = self.inner.update(imdb_id, mutation)?;
        if let Err(e) = self.flush() {
            let _ = self.inner.remove(imdb_id);
            let _ = self.inner.insert(previous);
            return Err(e);
        }
        Ok(updated)
    }

    fn remove(&mut self, imdb_id: &str) -> WatchlistResult<MovieRecord> {
        let removed = self.inner.remove(imdb_id)?;
        if let Err(e) = self.flush() {
            let _ = self.inner.insert(removed);
            return Err(e);
        }
        Ok(removed)
    }

    fn get(&self, imdb_id: &str) -> Option<&MovieRecord> {
        self.inner.get(imdb_id)
    }

    fn list_all(&self) -> Vec<MovieRecord> {
        self.inner.list_all()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    // One write for the whole batch instead of one per record
    fn seed_if_empty(&mut self, defaults: Vec<MovieRecord>) -> WatchlistResult<usize> {
        if !self.inner.is_empty() {
            return Ok(0);
        }
        // The store was empty, so resetting it undoes any partial seed
        let count = match self.inner.seed_if_empty(defaults) {
            Ok(count) => count,
            Err(e) => {
                self.inner = InMemoryRepository::new();
                return Err(e);
            }
        };
        if let Err(e) = self.flush() {
            self.inner = InMemoryRepository::new();
            return Err(e);
        }
        info!("Seeded watchlist with {} movies", count);
        Ok(count)
    }
}
