//! Configuration management for Cinescope

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable that overrides `api.api_key`
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub image_size: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            image_size: "w500".to_string(),
            api_key: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "~/.local/share/cinescope/store.db".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing config file is not an error; the defaults are used instead.
    /// `TMDB_API_KEY` takes precedence over the file's `api.api_key`.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            Self::default_config()
        };
        Ok(config.with_env_overrides())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            store: StoreConfig::default(),
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api.api_key = Some(key);
            }
        }
        self
    }

    /// The configured API key, or an error naming the missing field
    pub fn api_key(&self) -> Result<&str> {
        self.api
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("api.api_key".to_string()).into())
    }

    /// Tilde-expanded path of the store database
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.store.path).to_string())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CINESCOPE_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("cinescope").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("cinescope"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_points_at_tmdb() {
        let config = Config::default_config();
        assert_eq!(config.api.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.api.image_base_url, "https://image.tmdb.org/t/p");
        assert_eq!(config.api.image_size, "w500");
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\napi_key = \"abc123\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.api.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.store.path, "~/.local/share/cinescope/store.db");
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Failed to parse config"));
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let config = Config::default_config();
        let err = config.api_key().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field: api.api_key"
        );
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let mut config = Config::default_config();
        config.api.api_key = Some("   ".to_string());
        assert!(config.api_key().is_err());
    }

    #[test]
    #[serial]
    fn test_env_api_key_overrides_file() {
        std::env::set_var(API_KEY_ENV, "from-env");
        let mut config = Config::default_config();
        config.api.api_key = Some("from-file".to_string());
        let config = config.with_env_overrides();
        std::env::remove_var(API_KEY_ENV);

        assert_eq!(config.api_key().unwrap(), "from-env");
    }

    #[test]
    #[serial]
    fn test_load_uses_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("CINESCOPE_CONFIG", dir.path().join("absent.toml"));
        std::env::remove_var(API_KEY_ENV);
        let config = Config::load().unwrap();
        std::env::remove_var("CINESCOPE_CONFIG");

        assert_eq!(config.api.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_store_path_expands_tilde() {
        let config = Config::default_config();
        let path = config.store_path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("cinescope/store.db"));
    }
}
