//! Application state shared across all handlers.

use std::sync::Arc;

use folio_core::config::AppConfig;
use folio_core::error::AppError;
use folio_core::traits::StorageProvider;
use folio_database::DatabasePool;
use folio_service::{FileService, FolderService, Presenter};

use crate::error::ApiError;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db_pool: DatabasePool,
    /// Storage backend
    pub storage: Arc<dyn StorageProvider>,
    /// Response shaping
    pub presenter: Arc<Presenter>,
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// File service
    pub file_service: Arc<FileService>,
}

impl AppState {
    /// Render the failure of a mutating operation per configuration.
    pub fn mutation_error(&self, err: AppError) -> ApiError {
        ApiError::mutation(err, self.config.server.expose_error_details)
    }
}
