pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, HomeConfig, LoggingConfig, OmdbConfig, StorageConfig, DEFAULT_OMDB_BASE_URL, OMDB_API_KEY_ENV};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
