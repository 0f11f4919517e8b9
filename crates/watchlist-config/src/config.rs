use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::credentials::CredentialStore;
use crate::paths::PathManager;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
/// Environment variable that overrides every other API key source
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Overrides `<data_dir>/watchlist.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub seed_on_first_run: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HomeConfig {
    #[serde(default = "default_section_size")]
    pub section_size: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_section_size() -> usize {
    10
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            seed_on_first_run: default_true(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            section_size: default_section_size(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.home.section_size == 0 {
            return Err(anyhow::anyhow!("home.section_size must be greater than zero"));
        }

        let base_url = self.omdb.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL: {}", base_url));
        }

        if self.omdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("omdb.timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Resolve the OMDb API key: environment, then credentials file, then config
    pub fn resolve_api_key(&self, credentials: &CredentialStore) -> Option<String> {
        pick_api_key(
            std::env::var(OMDB_API_KEY_ENV).ok(),
            credentials.get_omdb_api_key().cloned(),
            self.omdb.api_key.clone(),
        )
    }

    /// Where the watchlist document store lives
    pub fn storage_path(&self, path_manager: &PathManager) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(|| path_manager.watchlist_file())
    }
}

fn pick_api_key(
    from_env: Option<String>,
    from_credentials: Option<String>,
    from_config: Option<String>,
) -> Option<String> {
    [from_env, from_credentials, from_config]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.omdb.api_key = Some("test_key".to_string());
        config.omdb.max_retries = 0;
        config.home.section_size = 5;
        config.storage.path = Some(PathBuf::from("/tmp/watchlist.json"));

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.omdb.api_key.as_deref(), Some("test_key"));
        assert_eq!(loaded.omdb.max_retries, 0);
        assert_eq!(loaded.home.section_size, 5);
        assert_eq!(loaded.storage.path, Some(PathBuf::from("/tmp/watchlist.json")));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[omdb]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(config.omdb.api_key.as_deref(), Some("abc"));
        assert_eq!(config.omdb.base_url, DEFAULT_OMDB_BASE_URL);
        assert_eq!(config.omdb.timeout_secs, 15);
        assert_eq!(config.omdb.max_retries, 2);
        assert_eq!(config.omdb.retry_backoff_ms, 500);
        assert!(config.storage.seed_on_first_run);
        assert_eq!(config.home.section_size, 10);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.home.section_size, 10);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.home.section_size = 0;
        assert!(config.validate().is_err());

        config.home.section_size = 10;
        config.omdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.omdb.base_url = "http://localhost:8080/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pick_api_key_precedence() {
        assert_eq!(
            pick_api_key(Some("env".into()), Some("cred".into()), Some("cfg".into())),
            Some("env".to_string())
        );
        assert_eq!(
            pick_api_key(None, Some("cred".into()), Some("cfg".into())),
            Some("cred".to_string())
        );
        // Blank values are skipped rather than used
        assert_eq!(
            pick_api_key(Some("  ".into()), None, Some("cfg".into())),
            Some("cfg".to_string())
        );
        assert_eq!(pick_api_key(None, None, None), None);
    }

    #[test]
    fn test_storage_path() {
        let paths = PathManager::from_base(PathBuf::from("/srv/watchlist"));
        let mut config = Config::default();
        assert_eq!(config.storage_path(&paths), PathBuf::from("/srv/watchlist/data/watchlist.json"));

        config.storage.path = Some(PathBuf::from("/elsewhere/movies.json"));
        assert_eq!(config.storage_path(&paths), PathBuf::from("/elsewhere/movies.json"));
    }
}
