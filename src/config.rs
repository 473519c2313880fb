//! Configuration management for omdbtui
//!
//! Config is stored at ~/.config/omdbtui/config.toml. Every field is optional;
//! missing values fall back to built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::api::omdb::{DEFAULT_API_KEY, DEFAULT_BASE_URL};
use crate::images::DEFAULT_CAPACITY;
use crate::search::{DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN};

/// Environment variable that overrides the API key
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// OMDb API key
    pub api_key: Option<String>,
    /// OMDb endpoint (mainly for testing against a local server)
    pub base_url: Option<String>,
    /// Search debounce in milliseconds
    pub debounce_ms: Option<u64>,
    /// Queries must be longer than this many characters
    pub min_query_len: Option<usize>,
    /// Number of decoded posters kept in memory
    pub image_cache_capacity: Option<usize>,
}

impl Config {
    /// Get config file path (~/.config/omdbtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("omdbtui").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from a specific file. A missing file is not an error;
    /// a malformed one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }

    /// Get API key with fallback chain:
    /// 1. Environment variable OMDB_API_KEY
    /// 2. Key from config file
    /// 3. Bundled default key
    pub fn api_key(&self) -> String {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return key;
            }
        }

        self.api_key
            .clone()
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string())
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len.unwrap_or(DEFAULT_MIN_QUERY_LEN)
    }

    pub fn image_cache_capacity(&self) -> usize {
        self.image_cache_capacity.unwrap_or(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url(), "http://www.omdbapi.com");
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.min_query_len(), 3);
        assert_eq!(config.image_cache_capacity(), 256);
    }

    #[test]
    fn test_api_key_fallback_chain() {
        let config = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };

        std::env::remove_var(API_KEY_ENV);
        assert_eq!(config.api_key(), "from-file");
        assert_eq!(Config::default().api_key(), DEFAULT_API_KEY);

        std::env::set_var(API_KEY_ENV, "   ");
        assert_eq!(config.api_key(), "from-file");

        std::env::set_var(API_KEY_ENV, "from-env");
        assert_eq!(config.api_key(), "from-env");

        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    fn test_config_parses_partial_toml() {
        let config: Config = toml::from_str("debounce_ms = 250\nmin_query_len = 2\n").unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.min_query_len(), 2);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/omdbtui/config.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("omdbtui-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "api_key = \"abc123\"\nimage_cache_capacity = 16\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.image_cache_capacity(), 16);
        assert_eq!(config.debounce(), Duration::from_millis(500));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = std::env::temp_dir().join(format!("omdbtui-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "debounce_ms = \"soon\"").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());

        let _ = std::fs::remove_dir_all(dir);
    }
}
