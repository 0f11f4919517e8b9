use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const OMDB_API_KEY: &str = "omdb_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Secrets kept apart from `config.toml` so the config can be shared
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_omdb_api_key(&self) -> Option<&String> {
        self.get(OMDB_API_KEY)
    }

    pub fn set_omdb_api_key(&mut self, key: String) {
        self.set(OMDB_API_KEY.to_string(), key);
    }

    pub fn clear_omdb_api_key(&mut self) {
        self.remove(OMDB_API_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_omdb_api_key("test_key".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_omdb_api_key(), Some(&"test_key".to_string()));
    }

    #[test]
    fn test_credential_store_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert_eq!(store.get_omdb_api_key(), None);
    }

    #[test]
    fn test_credential_store_clear() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_omdb_api_key("key".to_string());
        store.set("other".to_string(), "value".to_string());

        store.clear_omdb_api_key();
        assert_eq!(store.get_omdb_api_key(), None);
        assert_eq!(store.get("other"), Some(&"value".to_string()));
    }
}
