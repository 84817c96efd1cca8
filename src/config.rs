// Storage configuration: where the three documents live and how they are written
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub hotels_file: String,
    pub customers_file: String,
    pub reservations_file: String,
    // Indented JSON output
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            hotels_file: "hotels.json".to_string(),
            customers_file: "customers.json".to_string(),
            reservations_file: "reservations.json".to_string(),
            pretty: true,
        }
    }
}

impl StorageConfig {
    // Default file names under a custom directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn hotels_path(&self) -> PathBuf {
        self.data_dir.join(&self.hotels_file)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(&self.customers_file)
    }

    pub fn reservations_path(&self) -> PathBuf {
        self.data_dir.join(&self.reservations_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = StorageConfig::default();
        assert_eq!(config.hotels_path(), PathBuf::from("./data/hotels.json"));
        assert_eq!(
            config.customers_path(),
            PathBuf::from("./data/customers.json")
        );
        assert_eq!(
            config.reservations_path(),
            PathBuf::from("./data/reservations.json")
        );
        assert!(config.pretty);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = StorageConfig::from_toml_str(
            r#"
            data_dir = "/var/lib/hotels"
            pretty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/hotels"));
        assert_eq!(config.hotels_file, "hotels.json");
        assert!(!config.pretty);
    }

    #[test]
    fn test_invalid_toml() {
        let result = StorageConfig::from_toml_str("data_dir = [");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.toml");
        std::fs::write(&path, "hotels_file = \"h.json\"\n").unwrap();

        let config = StorageConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.hotels_file, "h.json");

        let missing = StorageConfig::from_toml_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}
