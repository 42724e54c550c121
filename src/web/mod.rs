//! HTTP surface: shared state, the route table, and handlers.

pub mod error;
pub mod handlers;

use crate::config::AppConfig;
use crate::error::Result;
use crate::tasks::{SqliteTaskStore, TaskStore};
use crate::templates::Templates;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore + Send + Sync>,
    templates: Arc<Templates>,
}

impl AppState {
    /// Bundle a store and loaded templates.
    pub fn new(store: impl TaskStore + Send + Sync + 'static, templates: Templates) -> Self {
        Self { store: Arc::new(store), templates: Arc::new(templates) }
    }

    /// The template engine.
    #[must_use]
    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Run a store operation on the blocking pool.
    ///
    /// `SQLite` calls block, so they stay off the async workers.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or [`crate::error::Error::Blocking`] if
    /// it panicked.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&dyn TaskStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&*store)).await?
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Build the route table.
///
/// Files under `static_dir` are served at `/static`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route("/update/{id}", post(handlers::update_task))
        .route("/delete/{id}", post(handlers::delete_task))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the table, load templates, and serve until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the database, templates, or listener cannot be set up.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let store = SqliteTaskStore::new(&config.database)?;
    let templates = Templates::load(config.templates_dir.as_deref())?;
    let app = router(AppState::new(store, templates), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        database = %config.database.display(),
        "serving tasks"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutting down");
}
