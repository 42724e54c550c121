//! Configuration management for task-tracker.
//!
//! Settings live in an optional `task-tracker.yaml` next to where the server
//! is started. Every field has a default, so a missing file or a partial file
//! is fine. Command-line flags are applied on top by the binary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Config file path relative to the working directory.
pub const CONFIG_FILE_PATH: &str = "task-tracker.yaml";

/// Default address the server listens on.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Address to listen on, as `host:port`.
    pub bind: String,

    /// Path to the `SQLite` database file.
    pub database: PathBuf,

    /// Directory whose `*.html` files override the embedded templates.
    /// None means only the embedded templates are used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Default log level for this crate when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            database: PathBuf::from("tasks.db"),
            templates_dir: None,
            static_dir: PathBuf::from("static"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from a specific base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or is invalid.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        Self::load_file(&Self::config_path(base_dir))
    }

    /// Load config from an explicit file path, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or is invalid.
    pub fn load_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Save config to a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the settings can be used to start a server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first unusable setting.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.database.as_os_str().is_empty() {
            return Err(Error::Config("database path must not be empty".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(Error::Config("log_level must not be empty".into()));
        }
        Ok(())
    }

    /// The bind address as a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `bind` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| Error::Config(format!("bind address '{}' is not host:port", self.bind)))
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        assert_eq!(AppConfig::load_from(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            bind: "0.0.0.0:8080".to_string(),
            templates_dir: Some(PathBuf::from("my-templates")),
            ..Default::default()
        };

        config.save_to_file(&AppConfig::config_path(dir.path())).unwrap();
        let loaded = AppConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(AppConfig::config_path(dir.path()), "database: data/tasks.sqlite3\n").unwrap();

        let loaded = AppConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.database, PathBuf::from("data/tasks.sqlite3"));
        assert_eq!(loaded.bind, DEFAULT_BIND);
        assert_eq!(loaded.static_dir, PathBuf::from("static"));
        assert_eq!(loaded.templates_dir, None);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(AppConfig::config_path(dir.path()), "bind: [unclosed").unwrap();
        assert!(matches!(AppConfig::load_from(dir.path()), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_invalid_bind_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(AppConfig::config_path(dir.path()), "bind: localhost\n").unwrap();

        let err = AppConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn test_default_socket_addr() {
        let addr = AppConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_empty_database_rejected() {
        let config = AppConfig { database: PathBuf::new(), ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("task-tracker.yaml");
        AppConfig::default().save_to_file(&path).unwrap();
        assert!(path.exists());
        assert!(fs::read_to_string(&path).unwrap().contains("bind:"));
    }
}
