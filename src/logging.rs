//! Tracing subscriber setup.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise dependencies log at `warn` and this
/// crate and the HTTP trace layer log at `level`.
#[must_use]
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level))
}

fn default_filter(level: &str) -> EnvFilter {
    let directives = format!("warn,task_tracker={level},tower_http={level}");
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn,task_tracker=info"))
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init(level: &str) {
    let filter = env_filter(level);
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_includes_level() {
        let filter = default_filter("debug").to_string();
        assert!(filter.contains("task_tracker=debug"), "filter was {filter}");
        assert!(filter.contains("tower_http=debug"), "filter was {filter}");
    }

    #[test]
    fn test_bad_level_falls_back() {
        let filter = default_filter("not a level!").to_string();
        assert!(filter.contains("task_tracker=info"), "filter was {filter}");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("info");
        init("debug");
    }
}
