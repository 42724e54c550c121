//! Task store trait and `SQLite` implementation.

use crate::error::Result;
use crate::tasks::models::{Priority, StatusFilter, Task};
use crate::tasks::validation::DueDate;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Format of the `created_at` column, written in UTC.
///
/// Sub-second precision keeps tasks created within the same minute in
/// creation order. UTC keeps that order across daylight saving changes.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const TASK_COLUMNS: &str = "id, title, done, priority, due_date, created_at";

/// Trait for task storage operations.
///
/// Every operation acquires its own connection and releases it before
/// returning, on success and on failure.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    /// Create the tasks table if it does not already exist.
    fn create_table(&self) -> Result<()>;

    /// Insert a new task and return its id.
    fn insert_task(
        &self,
        title: &str,
        priority: Option<Priority>,
        due_date: Option<DueDate>,
    ) -> Result<i64>;

    /// List tasks matching the filter, newest first.
    fn list_tasks(&self, filter: StatusFilter) -> Result<Vec<Task>>;

    /// Apply a partial update. Returns whether a row was changed.
    fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<bool>;

    /// Delete a task by id. Returns whether a row was removed.
    fn delete_task(&self, id: i64) -> Result<bool>;
}

/// Fields that can be updated on a task.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New title (if Some).
    pub title: Option<String>,
    /// New priority (if Some).
    pub priority: Option<Priority>,
    /// New completion flag (if Some).
    pub done: Option<bool>,
    /// New due date (if Some).
    pub due_date: Option<DueDate>,
}

impl TaskUpdate {
    /// Check if any fields are set for update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.priority.is_none()
            && self.done.is_none()
            && self.due_date.is_none()
    }
}

/// SQLite-based task store.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Create a new `SQLite` task store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.create_table()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    ///
    /// The connection closes when the returned value is dropped.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Connection::open(&self.db_path)?)
    }

    /// Parse a task from a row.
    fn parse_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let priority: Option<String> = row.get(3)?;

        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            done: row.get(2)?,
            priority: priority.and_then(|p| p.parse().ok()),
            due_date: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl TaskStore for SqliteTaskStore {
    fn create_table(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                done BOOLEAN NOT NULL DEFAULT 0,
                priority TEXT,
                due_date TEXT,
                created_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    fn insert_task(
        &self,
        title: &str,
        priority: Option<Priority>,
        due_date: Option<DueDate>,
    ) -> Result<i64> {
        let mut conn = self.open()?;
        let created_at = Utc::now().format(CREATED_AT_FORMAT).to_string();

        // Uncommitted transactions roll back on drop.
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO tasks (created_at, title, priority, due_date) VALUES (?1, ?2, ?3, ?4)",
            params![
                created_at,
                title,
                priority.map(Priority::as_str),
                due_date.map(|d| d.to_stored())
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(id, "inserted task");
        Ok(id)
    }

    fn list_tasks(&self, filter: StatusFilter) -> Result<Vec<Task>> {
        let conn = self.open()?;

        let where_clause = match filter {
            StatusFilter::All => "",
            StatusFilter::Done => "WHERE done = 1",
            StatusFilter::Pending => "WHERE done = 0",
        };

        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks {where_clause} ORDER BY created_at DESC, id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt.query_map([], Self::parse_task)?.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tasks)
    }

    fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<bool> {
        if update.is_empty() {
            return Ok(false);
        }

        // Build dynamic UPDATE statement
        let mut updates = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref title) = update.title {
            updates.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(priority) = update.priority {
            updates.push("priority = ?");
            values.push(Box::new(priority.as_str()));
        }
        if let Some(done) = update.done {
            updates.push("done = ?");
            values.push(Box::new(done));
        }
        if let Some(due_date) = update.due_date {
            updates.push("due_date = ?");
            values.push(Box::new(due_date.to_stored()));
        }

        values.push(Box::new(id));

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", updates.join(", "));
        let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(AsRef::as_ref).collect();

        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let rows = tx.execute(&sql, params.as_slice())?;
        tx.commit()?;

        Ok(rows > 0)
    }

    fn delete_task(&self, id: i64) -> Result<bool> {
        let mut conn = self.open()?;

        let tx = conn.transaction()?;
        let rows = tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        tx.commit()?;

        Ok(rows > 0)
    }
}
