//! Request handlers for the task list, create, update, and delete routes.

use crate::tasks::validation::{validate_new_task, validate_task_edit, ValidationError};
use crate::tasks::{StatusFilter, Task, TaskUpdate};
use crate::templates::{FormValues, IndexPage};
use crate::web::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::Local;
use serde::Deserialize;

/// Where every successful request is sent.
pub const LIST_PATH: &str = "/tasks";

/// Query string of the list view.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// `done`, `pending`, or absent.
    pub status: Option<String>,
}

/// Fields posted by the add and edit forms.
///
/// Everything is optional here; validation decides what is required.
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    /// Task title.
    pub title: Option<String>,
    /// Priority in any casing.
    pub priority: Option<String>,
    /// Checkbox value, `on` when ticked. Only sent by the edit form.
    pub done: Option<String>,
    /// Due date as `YYYY-MM-DDTHH:MM`.
    pub due_date: Option<String>,
}

impl TaskForm {
    /// The submitted values, unvalidated, for re-filling the form.
    fn echo(&self) -> FormValues {
        FormValues {
            title: self.title.clone().unwrap_or_default(),
            priority: self.priority.clone().unwrap_or_default(),
            due_date: self.due_date.clone().unwrap_or_default(),
            done: self.done.as_deref() == Some("on"),
        }
    }
}

/// `302 Found` pointing at the list view.
fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LIST_PATH)]).into_response()
}

fn render(state: &AppState, page: &IndexPage<'_>) -> Result<Html<String>, AppError> {
    state.templates().render_index(page).map(Html).map_err(AppError::Render)
}

/// Show the form again with the validation message and what the user typed.
///
/// The list is fetched unfiltered. If that fetch fails the page is still
/// shown, with no tasks, so the message reaches the user.
async fn rerender_with_error(
    state: &AppState,
    error: ValidationError,
    form: &TaskForm,
    reopen_id: Option<i64>,
) -> Result<Response, AppError> {
    let tasks: Vec<Task> =
        state.with_store(|store| store.list_tasks(StatusFilter::All)).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to list tasks while showing a form error");
            Vec::new()
        });

    let message = error.to_string();
    let form_data = form.echo();
    let page = IndexPage {
        tasks: &tasks,
        error: Some(&message),
        form_data: Some(&form_data),
        reopen_id,
        status_filter: StatusFilter::All,
    };
    Ok(render(state, &page)?.into_response())
}

/// `GET /`
pub async fn home() -> Response {
    redirect_to_list()
}

/// `GET /tasks`
///
/// # Errors
///
/// Fails with 500 if the tasks cannot be read.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let filter = StatusFilter::from_query(query.status.as_deref());

    let tasks = state
        .with_store(move |store| store.list_tasks(filter))
        .await
        .map_err(|e| AppError::storage("Failed to retrieve tasks", e))?;

    render(&state, &IndexPage { tasks: &tasks, status_filter: filter, ..Default::default() })
}

/// `POST /tasks`
///
/// # Errors
///
/// Fails with 500 if the task cannot be stored.
pub async fn create_task(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Response, AppError> {
    let today = Local::now().date_naive();
    let new_task = match validate_new_task(
        form.title.as_deref(),
        form.priority.as_deref(),
        form.due_date.as_deref(),
        today,
    ) {
        Ok(new_task) => new_task,
        Err(err) => return rerender_with_error(&state, err, &form, None).await,
    };

    let id = state
        .with_store(move |store| {
            store.insert_task(&new_task.title, new_task.priority, new_task.due_date)
        })
        .await
        .map_err(|e| AppError::storage("Failed to add task.", e))?;

    tracing::info!(id, "created task");
    Ok(redirect_to_list())
}

/// `POST /update/{id}`
///
/// Title and completion are always written. Priority and due date are only
/// written when supplied, so leaving them blank keeps the stored values.
///
/// # Errors
///
/// Fails with 500 if the update cannot be stored.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<TaskForm>,
) -> Result<Response, AppError> {
    let today = Local::now().date_naive();
    let edit = match validate_task_edit(
        form.title.as_deref(),
        form.priority.as_deref(),
        form.done.as_deref(),
        form.due_date.as_deref(),
        today,
    ) {
        Ok(edit) => edit,
        Err(err) => return rerender_with_error(&state, err, &form, Some(id)).await,
    };

    let update = TaskUpdate {
        title: Some(edit.title),
        priority: edit.priority,
        done: Some(edit.done),
        due_date: edit.due_date,
    };
    let changed = state
        .with_store(move |store| store.update_task(id, &update))
        .await
        .map_err(|e| AppError::storage("Failed to update task.", e))?;

    if changed {
        tracing::info!(id, "updated task");
    } else {
        // Unknown ids are not reported to the user.
        tracing::debug!(id, "update matched no task");
    }
    Ok(redirect_to_list())
}

/// `POST /delete/{id}`
///
/// # Errors
///
/// Fails with 500 if the delete cannot be stored.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let removed = state
        .with_store(move |store| store.delete_task(id))
        .await
        .map_err(|e| AppError::storage("Failed to delete task.", e))?;

    if removed {
        tracing::info!(id, "deleted task");
    } else {
        tracing::debug!(id, "delete matched no task");
    }
    Ok(redirect_to_list())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_keeps_raw_values() {
        let form = TaskForm {
            title: Some("  spaced ".into()),
            priority: Some("URGENT".into()),
            done: Some("on".into()),
            due_date: Some("not a date".into()),
        };
        let echoed = form.echo();
        assert_eq!(echoed.title, "  spaced ");
        assert_eq!(echoed.priority, "URGENT");
        assert_eq!(echoed.due_date, "not a date");
        assert!(echoed.done);
    }

    #[test]
    fn test_echo_of_missing_fields() {
        assert_eq!(TaskForm::default().echo(), FormValues::default());
    }

    #[test]
    fn test_redirect_is_302_to_list() {
        let response = redirect_to_list();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], LIST_PATH);
    }
}
