//! Page rendering using Tera.
//!
//! Templates are embedded in the binary. A templates directory, when
//! configured, can override any of them by name.

use crate::error::{Error, Result};
use crate::tasks::models::{Priority, StatusFilter, Task};
use crate::tasks::validation::{FORM_DATETIME_FORMAT, STORED_DATETIME_FORMAT};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera, Value};

/// Name of the task list page.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Display format for due dates, e.g. `Jan 01, 2999 at 10:00 AM`.
pub const DISPLAY_DATETIME_FORMAT: &str = "%b %d, %Y at %I:%M %p";

/// Embedded default templates for fallback when files don't exist.
const EMBEDDED_TEMPLATES: &[(&str, &str)] =
    &[(INDEX_TEMPLATE, include_str!("../templates/index.html"))];

/// A loaded template engine.
#[derive(Debug, Clone)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Load templates, preferring files under `templates_dir` over the
    /// embedded defaults.
    ///
    /// A missing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but contains invalid templates.
    pub fn load(templates_dir: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();

        // Try to load from filesystem first
        if let Some(dir) = templates_dir.filter(|d| d.exists()) {
            let glob_pattern = format!("{}/**/*.html", dir.display());
            tera = Tera::new(&glob_pattern).map_err(|e| {
                Error::Template(format!("Failed to load templates from {}: {e}", dir.display()))
            })?;
            tracing::info!(dir = %dir.display(), "loaded templates from filesystem");
        }

        // Add any missing templates from embedded defaults
        for (name, content) in EMBEDDED_TEMPLATES {
            if tera.get_template(name).is_err() {
                tera.add_raw_template(name, content).map_err(|e| {
                    Error::Template(format!("Invalid embedded template {name}: {e}"))
                })?;
            }
        }

        tera.register_filter("datetimeformat", datetimeformat_filter);

        Ok(Self { tera })
    }

    /// Load only the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template is invalid.
    pub fn embedded() -> Result<Self> {
        Self::load(None)
    }

    /// Render a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns an error if the template doesn't exist or rendering fails.
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(name, context)
            .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))
    }

    /// Render the task list page.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_index(&self, page: &IndexPage<'_>) -> Result<String> {
        self.render(INDEX_TEMPLATE, &page.to_context())
    }
}

/// Values a user submitted, echoed back into the form after a validation
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    /// Submitted title.
    pub title: String,
    /// Submitted priority, as typed.
    pub priority: String,
    /// Submitted due date, as typed.
    pub due_date: String,
    /// Submitted completion flag.
    pub done: bool,
}

/// Everything the task list page shows.
#[derive(Debug, Default)]
pub struct IndexPage<'a> {
    /// Tasks to list.
    pub tasks: &'a [Task],
    /// Validation message, if any.
    pub error: Option<&'a str>,
    /// Submitted values to pre-fill.
    pub form_data: Option<&'a FormValues>,
    /// Task whose edit form should be open with `form_data` in it.
    pub reopen_id: Option<i64>,
    /// Active listing filter.
    pub status_filter: StatusFilter,
}

impl IndexPage<'_> {
    fn to_context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.insert("tasks", self.tasks);
        ctx.insert("error", &self.error);
        ctx.insert("form_data", &self.form_data);
        ctx.insert("reopen_id", &self.reopen_id);
        ctx.insert("status_filter", &self.status_filter.as_query());
        ctx.insert("priorities", &Priority::ALL.map(Priority::as_str));
        ctx
    }
}

fn parse_stored_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STORED_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, FORM_DATETIME_FORMAT))
        .ok()
}

/// Format a stored due date for display, or return it unchanged if it does
/// not parse.
#[must_use]
pub fn format_due_date(value: &str) -> String {
    parse_stored_datetime(value)
        .map_or_else(|| value.to_string(), |dt| dt.format(DISPLAY_DATETIME_FORMAT).to_string())
}

#[allow(clippy::unnecessary_wraps)]
fn datetimeformat_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(value.as_str().map_or_else(|| value.clone(), |s| Value::String(format_due_date(s))))
}
