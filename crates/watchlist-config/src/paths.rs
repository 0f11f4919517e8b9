use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("WATCHLIST_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchlist");

        Ok(Self::from_base(base_dir))
    }

    pub fn from_docker_env() -> Self {
        // In containers, config files sit directly in the base path
        Self::from_base(container_base_path())
    }

    /// Lay out all directories under one root (also used by tests)
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// Default location of the watchlist document store
    pub fn watchlist_file(&self) -> PathBuf {
        self.data_dir.join("watchlist.json")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // An existing container base directory means we run inside Docker
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        // Otherwise, use platform-specific paths (e.g., ~/.config/watchlist on Linux)
        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base(PathBuf::from("/srv/watchlist"));
        assert_eq!(paths.config_file(), PathBuf::from("/srv/watchlist/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/srv/watchlist/credentials.toml"));
        assert_eq!(paths.watchlist_file(), PathBuf::from("/srv/watchlist/data/watchlist.json"));
        assert_eq!(paths.log_dir(), Path::new("/srv/watchlist/logs"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().join("watchlist"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
