use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::file::DEFAULT_STORAGE_KEY;
use crate::utils::paths::{get_config_path, get_data_dir};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name the snapshot is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Overrides the directory snapshots are kept in
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_show_buttons")]
    pub show_buttons: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_show_buttons() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: None,
            log_level: default_log_level(),
            show_buttons: default_show_buttons(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    pub fn snapshot_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => get_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_key, "MinimalList");
        assert_eq!(config.log_level, "info");
        assert!(config.show_buttons);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_config_deserialization_fills_defaults() {
        let toml_str = r#"
        storage_key = "Groceries"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage_key, "Groceries");
        assert_eq!(config.log_level, "info");
        assert!(config.show_buttons);
    }

    #[test]
    fn test_snapshot_dir_override() {
        let toml_str = r#"
        data_dir = "/srv/lists"
        show_buttons = false
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.snapshot_dir().unwrap(), PathBuf::from("/srv/lists"));
        assert!(!config.show_buttons);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.storage_key, "MinimalList");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            log_level: "debug".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.storage_key, "MinimalList");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "storage_key = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
