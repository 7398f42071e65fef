//! Route definitions for the Folio HTTP API.
//!
//! All routes are mounted under the configured API prefix (`/api` by
//! default). The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and form fields on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the Axum router with all routes and the request logging layer.
pub fn build_router(state: AppState) -> Router {
    let body_limit =
        usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(health_routes());

    let prefix = normalize_prefix(&state.config.server.api_prefix);
    let router = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(&prefix, api_routes)
    };

    router
        .layer(DefaultBodyLimit::max(
            body_limit.saturating_add(MULTIPART_OVERHEAD),
        ))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder CRUD
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folder",
            get(handlers::folder::list_folders)
                .post(handlers::folder::create_folder)
                .delete(handlers::folder::delete_folders),
        )
        .route(
            "/folder/{folder}",
            get(handlers::folder::show_folder).post(handlers::folder::update_folder),
        )
}

/// File upload and delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/file", post(handlers::file::upload_file))
        .route("/file/{file}", delete(handlers::file::delete_file))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// `"api/"` and `"/api"` both become `"/api"`; `"/"` and `""` mean no prefix.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
