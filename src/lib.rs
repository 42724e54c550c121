//! # `task_tracker`
//!
//! A single-user task tracker: tasks live in one `SQLite` table and are
//! listed, created, edited, and deleted through server-rendered HTML forms.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tasks;
pub mod templates;
pub mod web;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
