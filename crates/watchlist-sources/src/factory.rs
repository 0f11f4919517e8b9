use anyhow::Result;
use tracing::debug;
use watchlist_config::{Config, CredentialStore, OMDB_API_KEY_ENV};
use crate::omdb::OmdbClient;

/// Build the OMDb client from configuration and stored credentials
pub fn create_movie_database(config: &Config, credentials: &CredentialStore) -> Result<OmdbClient> {
    let api_key = config.resolve_api_key(credentials).ok_or_else(|| {
        anyhow::anyhow!(
            "OMDb API key is not configured. Set {} or run 'watchlist config api-key'",
            OMDB_API_KEY_ENV
        )
    })?;

    debug!("Creating OMDb client for {}", config.omdb.base_url);
    Ok(OmdbClient::from_config(&config.omdb, api_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_create_movie_database_uses_configured_endpoint() {
        let mut config = Config::default();
        config.omdb.api_key = Some("config-key".to_string());
        config.omdb.base_url = "http://localhost:8080/".to_string();
        let credentials = CredentialStore::new(PathBuf::from("/nonexistent/credentials.toml"));

        // Skip when the environment already provides a key; precedence is covered in the config crate
        if std::env::var(OMDB_API_KEY_ENV).is_ok() {
            return;
        }

        let client = create_movie_database(&config, &credentials).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/");
    }

    #[test]
    fn test_create_movie_database_requires_key() {
        if std::env::var(OMDB_API_KEY_ENV).is_ok() {
            return;
        }
        let credentials = CredentialStore::new(PathBuf::from("/nonexistent/credentials.toml"));
        let err = create_movie_database(&Config::default(), &credentials).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }
}
