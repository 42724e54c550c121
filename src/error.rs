//! Error types for `task_tracker`.

/// Errors that can occur while serving or storing tasks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The `SQLite` store could not be opened, read, or written.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// A store call running on the blocking pool panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    /// The configuration is not usable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
