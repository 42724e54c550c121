//! Form validation for new and edited tasks.
//!
//! Checks run in a fixed order (title, priority, due date) and stop at the
//! first failure. The current date is passed in rather than read from the
//! clock so callers and tests decide what "today" means.

use crate::tasks::models::Priority;
use chrono::{NaiveDate, NaiveDateTime};

/// Format accepted from `<input type="datetime-local">`.
pub const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format due dates are stored in.
pub const STORED_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A business rule a submitted form broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The title was missing or empty.
    #[error("Title is required.")]
    TitleRequired,

    /// The priority was not one of high, medium, or low.
    #[error("Priority must be High, Medium, or Low.")]
    InvalidPriority,

    /// The due date did not match `YYYY-MM-DDTHH:MM`.
    #[error("Invalid due date format, use YYYY-MM-DDTHH:MM.")]
    InvalidDueDateFormat,

    /// The due date falls on a day before today.
    #[error("Due date cannot be in the past.")]
    DueDateInPast,
}

/// A due date that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDate(NaiveDateTime);

impl DueDate {
    /// The value written to the `due_date` column.
    #[must_use]
    pub fn to_stored(&self) -> String {
        self.0.format(STORED_DATETIME_FORMAT).to_string()
    }
}

/// Validated fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Non-empty title.
    pub title: String,
    /// Normalized priority, if given.
    pub priority: Option<Priority>,
    /// Due date, if given.
    pub due_date: Option<DueDate>,
}

/// Validated fields for an edit of an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    /// Non-empty title.
    pub title: String,
    /// Normalized priority, if given. `None` leaves the stored value alone.
    pub priority: Option<Priority>,
    /// Completion flag from the checkbox.
    pub done: bool,
    /// Due date, if given. `None` leaves the stored value alone.
    pub due_date: Option<DueDate>,
}

/// Require a non-empty title.
///
/// # Errors
///
/// Returns [`ValidationError::TitleRequired`] if the title is absent or empty.
pub fn validate_title(title: Option<&str>) -> Result<String, ValidationError> {
    match title {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(ValidationError::TitleRequired),
    }
}

/// Normalize an optional priority.
///
/// Empty or absent input means no priority.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPriority`] for anything other than
/// high, medium, or low in any casing.
pub fn parse_priority(priority: Option<&str>) -> Result<Option<Priority>, ValidationError> {
    match priority.map(str::trim) {
        None | Some("") => Ok(None),
        Some(p) => p.parse().map(Some).map_err(|_| ValidationError::InvalidPriority),
    }
}

/// Parse an optional due date submitted as `YYYY-MM-DDTHH:MM`.
///
/// Only the date part is compared with `today`, so any time later today is
/// accepted.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDueDateFormat`] if the input does not
/// parse, or [`ValidationError::DueDateInPast`] if its date is before `today`.
pub fn parse_due_date(
    due_date: Option<&str>,
    today: NaiveDate,
) -> Result<Option<DueDate>, ValidationError> {
    let Some(raw) = due_date.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let parsed = NaiveDateTime::parse_from_str(raw, FORM_DATETIME_FORMAT)
        .map_err(|_| ValidationError::InvalidDueDateFormat)?;

    if parsed.date() < today {
        return Err(ValidationError::DueDateInPast);
    }

    Ok(Some(DueDate(parsed)))
}

/// Interpret an HTML checkbox value.
#[must_use]
pub fn parse_done(done: Option<&str>) -> bool {
    done == Some("on")
}

/// Validate the fields of the create form.
///
/// # Errors
///
/// Returns the first rule the submission breaks.
pub fn validate_new_task(
    title: Option<&str>,
    priority: Option<&str>,
    due_date: Option<&str>,
    today: NaiveDate,
) -> Result<NewTask, ValidationError> {
    let title = validate_title(title)?;
    let priority = parse_priority(priority)?;
    let due_date = parse_due_date(due_date, today)?;
    Ok(NewTask { title, priority, due_date })
}

/// Validate the fields of the edit form.
///
/// # Errors
///
/// Returns the first rule the submission breaks.
pub fn validate_task_edit(
    title: Option<&str>,
    priority: Option<&str>,
    done: Option<&str>,
    due_date: Option<&str>,
    today: NaiveDate,
) -> Result<TaskEdit, ValidationError> {
    let title = validate_title(title)?;
    let priority = parse_priority(priority)?;
    let due_date = parse_due_date(due_date, today)?;
    Ok(TaskEdit { title, priority, done: parse_done(done), due_date })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_title_required() {
        assert_eq!(validate_title(None), Err(ValidationError::TitleRequired));
        assert_eq!(validate_title(Some("")), Err(ValidationError::TitleRequired));
        assert_eq!(validate_title(Some("Buy milk")), Ok("Buy milk".to_string()));
    }

    #[test]
    fn test_priority_normalized() {
        assert_eq!(parse_priority(Some("HIGH")), Ok(Some(Priority::High)));
        assert_eq!(parse_priority(Some(" Low ")), Ok(Some(Priority::Low)));
        assert_eq!(parse_priority(Some("")), Ok(None));
        assert_eq!(parse_priority(None), Ok(None));
    }

    #[test]
    fn test_priority_rejects_unknown() {
        assert_eq!(parse_priority(Some("urgent")), Err(ValidationError::InvalidPriority));
        assert_eq!(
            ValidationError::InvalidPriority.to_string(),
            "Priority must be High, Medium, or Low."
        );
    }

    #[test]
    fn test_due_date_formats() {
        let due = parse_due_date(Some("2999-01-01T10:00"), today()).unwrap().unwrap();
        assert_eq!(due.to_stored(), "2999-01-01 10:00");

        assert_eq!(
            parse_due_date(Some("2999-01-01 10:00"), today()),
            Err(ValidationError::InvalidDueDateFormat)
        );
        assert_eq!(
            parse_due_date(Some("tomorrow"), today()),
            Err(ValidationError::InvalidDueDateFormat)
        );
        assert_eq!(parse_due_date(Some(""), today()), Ok(None));
        assert_eq!(parse_due_date(None, today()), Ok(None));
    }

    #[test]
    fn test_due_date_in_past() {
        assert_eq!(
            parse_due_date(Some("2000-01-01T00:00"), today()),
            Err(ValidationError::DueDateInPast)
        );
        assert_eq!(
            parse_due_date(Some("2026-10-17T23:59"), today()),
            Err(ValidationError::DueDateInPast)
        );
        assert_eq!(ValidationError::DueDateInPast.to_string(), "Due date cannot be in the past.");
    }

    #[test]
    fn test_due_date_earlier_today_is_accepted() {
        let due = parse_due_date(Some("2026-10-18T00:00"), today()).unwrap().unwrap();
        assert_eq!(due.to_stored(), "2026-10-18 00:00");
    }

    #[test]
    fn test_done_checkbox() {
        assert!(parse_done(Some("on")));
        assert!(!parse_done(Some("off")));
        assert!(!parse_done(Some("true")));
        assert!(!parse_done(None));
    }

    #[test]
    fn test_new_task_stops_at_first_failure() {
        // Empty title wins over a bad date.
        assert_eq!(
            validate_new_task(Some(""), None, Some("2000-01-01T00:00"), today()),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(
            validate_new_task(Some("x"), Some("urgent"), Some("garbage"), today()),
            Err(ValidationError::InvalidPriority)
        );
    }

    #[test]
    fn test_new_task_valid() {
        let task =
            validate_new_task(Some("Buy milk"), Some("low"), Some("2999-01-01T10:00"), today())
                .unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, Some(Priority::Low));
        assert_eq!(task.due_date.map(|d| d.to_stored()).as_deref(), Some("2999-01-01 10:00"));
    }

    #[test]
    fn test_task_edit_valid() {
        let edit =
            validate_task_edit(Some("Buy milk"), Some("HIGH"), Some("on"), None, today()).unwrap();
        assert_eq!(edit.priority, Some(Priority::High));
        assert!(edit.done);
        assert!(edit.due_date.is_none());
    }

    #[test]
    fn test_task_edit_order() {
        assert_eq!(
            validate_task_edit(None, Some("urgent"), Some("on"), None, today()),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(
            validate_task_edit(Some("t"), Some("urgent"), None, Some("2000-01-01T00:00"), today()),
            Err(ValidationError::InvalidPriority)
        );
        assert_eq!(
            validate_task_edit(Some("t"), Some("low"), None, Some("2000-01-01T00:00"), today()),
            Err(ValidationError::DueDateInPast)
        );
    }

    proptest! {
        #[test]
        fn prop_non_empty_titles_pass_through(title in ".+") {
            prop_assert_eq!(validate_title(Some(title.as_str())), Ok(title.clone()));
        }

        #[test]
        fn prop_dates_from_today_on_are_accepted(days in 0_i64..20_000, hour in 0_u32..24) {
            let day = today() + chrono::Duration::days(days);
            let input = format!("{}T{hour:02}:30", day.format("%Y-%m-%d"));
            let due = parse_due_date(Some(input.as_str()), today()).unwrap().unwrap();
            prop_assert_eq!(due.to_stored(), format!("{} {hour:02}:30", day.format("%Y-%m-%d")));
        }
    }
}
