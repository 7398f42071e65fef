//! Storage backend trait for the physical folder tree.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file storage backends.
///
/// All paths are relative to the backend's root and use `/` as the
/// separator. The [`StorageProvider`] trait is defined here in `folio-core`
/// and implemented in `folio-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Create a directory (and any missing parents).
    async fn create_dir(&self, path: &str) -> AppResult<()>;

    /// Move (rename) a file or directory within this provider.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;

    /// Delete a directory and all its contents recursively.
    async fn delete_dir(&self, path: &str) -> AppResult<()>;

    /// List every file below a directory, recursively, as relative paths.
    async fn all_files(&self, path: &str) -> AppResult<Vec<String>>;

    /// Write bytes to a file at the given path.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete a file at the given path.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a file or directory exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Public URL under which the object at `path` is served.
    fn url(&self, path: &str) -> String;
}
