//! Task management.
//!
//! This module provides the task model, form validation, and a `SQLite`-backed
//! store with one connection per operation.
//!
//! # Example
//!
//! ```no_run
//! use task_tracker::tasks::{SqliteTaskStore, StatusFilter, TaskStore, TaskUpdate};
//!
//! let store = SqliteTaskStore::new("/tmp/tasks.db").unwrap();
//!
//! let id = store.insert_task("Buy milk", None, None).unwrap();
//! store.update_task(id, &TaskUpdate { done: Some(true), ..Default::default() }).unwrap();
//!
//! let finished = store.list_tasks(StatusFilter::Done).unwrap();
//! assert_eq!(finished[0].id, id);
//! ```

pub mod models;
pub mod store;
pub mod validation;

pub use models::{InvalidPriority, Priority, StatusFilter, Task};
pub use store::{SqliteTaskStore, TaskStore, TaskUpdate};
pub use validation::{DueDate, NewTask, TaskEdit, ValidationError};
