//! Failures that end a request with HTTP 500.

use crate::error::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// An error a handler cannot recover from.
///
/// The body is a short plain-text message; the underlying cause is logged and
/// never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Reading or writing tasks failed.
    #[error("{message}")]
    Storage {
        /// Message shown to the user.
        message: &'static str,
        /// What went wrong underneath.
        #[source]
        source: Error,
    },

    /// The page template could not be rendered.
    #[error("Failed to render page.")]
    Render(#[source] Error),
}

impl AppError {
    /// Wrap a storage failure with the message the user should see.
    #[must_use]
    pub const fn storage(message: &'static str, source: Error) -> Self {
        Self::Storage { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Storage { message, source } => {
                tracing::error!(error = %source, "{message}");
            }
            Self::Render(source) => {
                tracing::error!(error = %source, "failed to render page");
            }
        }
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
