//! Command-line interface for task-tracker.

use crate::config::{AppConfig, CONFIG_FILE_PATH};
use crate::error::Result;
use crate::{logging, web};
use clap::Parser;
use std::path::PathBuf;

/// Serve the task tracker over HTTP.
///
/// Settings come from `task-tracker.yaml` when present; flags override them.
#[derive(Parser, Debug, Default)]
#[command(name = "task-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file to read
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Address to listen on, as host:port
    #[arg(long)]
    pub bind: Option<String>,

    /// SQLite database file
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Directory of templates overriding the built-in ones
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// Directory served under /static
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Log level for this application when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// The configuration file this invocation reads and writes.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_PATH))
    }

    /// Load the configuration file (or defaults) and apply flag overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the result is invalid.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load_file(&self.config_path())?.unwrap_or_default();

        if let Some(bind) = &self.bind {
            config.bind.clone_from(bind);
        }
        if let Some(database) = &self.database {
            config.database.clone_from(database);
        }
        if let Some(templates_dir) = &self.templates_dir {
            config.templates_dir = Some(templates_dir.clone());
        }
        if let Some(static_dir) = &self.static_dir {
            config.static_dir.clone_from(static_dir);
        }
        if let Some(log_level) = &self.log_level {
            config.log_level.clone_from(log_level);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run the command: write the config file, or serve until shut down.
///
/// # Errors
///
/// Returns an error if configuration, startup, or serving fails.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    logging::init(&config.log_level);

    if cli.write_config {
        let path = cli.config_path();
        config.save_to_file(&path)?;
        tracing::info!(path = %path.display(), "wrote configuration");
        return Ok(());
    }

    web::serve(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "task-tracker",
            "--bind",
            "0.0.0.0:8000",
            "--database",
            "/var/lib/tasks.db",
            "--write-config",
        ]);
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:8000"));
        assert_eq!(cli.database, Some(PathBuf::from("/var/lib/tasks.db")));
        assert!(cli.write_config);
        assert_eq!(cli.config_path(), PathBuf::from(CONFIG_FILE_PATH));
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "bind: 127.0.0.1:7000\ndatabase: from-file.db\n").unwrap();

        let cli = Cli {
            config: Some(path),
            database: Some(PathBuf::from("from-flag.db")),
            ..Default::default()
        };
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.bind, "127.0.0.1:7000");
        assert_eq!(config.database, PathBuf::from("from-flag.db"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let cli = Cli { config: Some(dir.path().join("absent.yaml")), ..Default::default() };
        assert_eq!(cli.resolve_config().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_bind_flag_rejected() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            config: Some(dir.path().join("absent.yaml")),
            bind: Some("not-an-address".into()),
            ..Default::default()
        };
        assert!(cli.resolve_config().is_err());
    }

    #[tokio::test]
    async fn test_write_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("written.yaml");
        let cli = Cli {
            config: Some(path.clone()),
            bind: Some("127.0.0.1:9999".into()),
            write_config: true,
            ..Default::default()
        };

        run(cli).await.unwrap();

        let written = AppConfig::load_file(&path).unwrap().unwrap();
        assert_eq!(written.bind, "127.0.0.1:9999");
    }
}
