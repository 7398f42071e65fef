//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_core::traits::StorageProvider;

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored folders and files.
    root: PathBuf,
    /// Base URL stored paths are served under.
    public_url: String,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str, public_url: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a relative path to an absolute path within the root.
    ///
    /// Parent components are rejected so a path can never leave the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let clean = path.trim_start_matches('/');
        let relative = Path::new(clean);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AppError::validation(format!("Invalid storage path: {path}")));
        }
        Ok(self.root.join(relative))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// Path of `full` relative to the root, with `/` separators.
    fn relative(&self, full: &Path) -> Option<String> {
        let rel = full.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn create_dir(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        fs::create_dir_all(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {path}"),
                e,
            )
        })?;
        debug!(path, "Created directory");
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        let from_path = self.resolve(from)?;
        let to_path = self.resolve(to)?;
        self.ensure_parent(&to_path).await?;

        fs::rename(&from_path, &to_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Nothing to move at {from}"),
                    e,
                )
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to rename {from} -> {to}"),
                    e,
                )
            }
        })?;
        debug!(from, to, "Renamed path");
        Ok(())
    }

    async fn delete_dir(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        if full_path == self.root {
            return Err(AppError::validation("Refusing to delete the storage root"));
        }
        if full_path.exists() {
            fs::remove_dir_all(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete directory: {path}"),
                    e,
                )
            })?;
            debug!(path, "Deleted directory");
        }
        Ok(())
    }

    async fn all_files(&self, path: &str) -> AppResult<Vec<String>> {
        let start = self.resolve(path)?;
        if !start.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut pending = vec![start];
        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to list directory: {}", dir.display()),
                    e,
                )
            })?;

            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
            })? {
                let file_type = entry.file_type().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to get entry type", e)
                })?;
                let entry_path = entry.path();
                if file_type.is_dir() {
                    pending.push(entry_path);
                } else if let Some(rel) = self.relative(&entry_path) {
                    files.push(rel);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        if full_path.is_file() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {path}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.resolve(path)?.exists())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.public_url, path.trim_start_matches('/'))
    }
}
