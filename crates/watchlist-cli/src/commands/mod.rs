pub mod config;
pub mod edit;
pub mod library;
pub mod progress;
pub mod prompts;
pub mod search;
pub mod table;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::sync::Arc;
use tracing::{debug, info};
use watchlist_config::{Config, CredentialStore, PathManager};
use watchlist_core::{JsonFileRepository, MovieRepository, WatchlistController};
use watchlist_sources::{create_movie_database, OmdbClient};

pub type Controller = WatchlistController<OmdbClient, JsonFileRepository>;

/// Paths, config and credentials shared by every command
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid config {}: {}", config_file.display(), e))?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

        Ok(Self {
            paths,
            config,
            credentials,
        })
    }

    /// Controller for commands that only touch the local watchlist.
    ///
    /// The client still needs an API key to do anything, but these commands never call it.
    pub fn offline_controller(&self) -> Result<Controller> {
        let api_key = self.config.resolve_api_key(&self.credentials).unwrap_or_default();
        self.controller_with(OmdbClient::from_config(&self.config.omdb, api_key), true)
    }

    /// Offline controller that leaves an empty watchlist empty, for `seed` itself
    pub fn unseeded_controller(&self) -> Result<Controller> {
        let api_key = self.config.resolve_api_key(&self.credentials).unwrap_or_default();
        self.controller_with(OmdbClient::from_config(&self.config.omdb, api_key), false)
    }

    /// Controller for commands that talk to OMDb; fails early without an API key
    pub fn online_controller(&self) -> Result<Controller> {
        let database = create_movie_database(&self.config, &self.credentials)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        self.controller_with(database, true)
    }

    fn controller_with(&self, database: OmdbClient, seed_on_open: bool) -> Result<Controller> {
        let storage_path = self.config.storage_path(&self.paths);
        debug!("Opening watchlist at {}", storage_path.display());
        let repository = JsonFileRepository::open(&storage_path)
            .wrap_err_with(|| format!("Failed to open watchlist at {}", storage_path.display()))?;

        let mut controller = WatchlistController::new(Arc::new(database), repository);
        if seed_on_open && self.config.storage.seed_on_first_run && controller.repository().is_empty() {
            let seeded = controller.seed_defaults()?;
            info!("Watchlist was empty; added {} default movies", seeded);
        }
        Ok(controller)
    }
}
