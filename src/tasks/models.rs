//! Task model types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// High priority.
    High,
    /// Medium priority.
    Medium,
    /// Low priority.
    Low,
}

impl Priority {
    /// All priorities, most important first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Get the stored (lowercase) representation of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = InvalidPriority;

    /// Parse a priority, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid priority string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPriority(pub String);

impl std::fmt::Display for InvalidPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid priority: '{}' (must be one of: high, medium, low)", self.0)
    }
}

impl std::error::Error for InvalidPriority {}

/// Which tasks a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Only tasks marked done.
    Done,
    /// Only tasks not yet done.
    Pending,
}

impl StatusFilter {
    /// Map the `status` query parameter to a filter.
    ///
    /// Anything other than `done` or `pending` lists every task.
    #[must_use]
    pub fn from_query(status: Option<&str>) -> Self {
        match status {
            Some("done") => Self::Done,
            Some("pending") => Self::Pending,
            _ => Self::All,
        }
    }

    /// The query value for this filter, or `None` for [`StatusFilter::All`].
    #[must_use]
    pub const fn as_query(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Done => Some("done"),
            Self::Pending => Some("pending"),
        }
    }
}

/// A task in the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Row identifier assigned by the database.
    pub id: i64,
    /// Short title describing the task.
    pub title: String,
    /// Whether the task has been completed.
    pub done: bool,
    /// Priority, if one was given.
    pub priority: Option<Priority>,
    /// Due date as stored (`YYYY-MM-DD HH:MM`), if one was given.
    pub due_date: Option<String>,
    /// Local timestamp when the task was created.
    pub created_at: String,
}
