//! File upload and deletion kept in lockstep with stored objects.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use folio_core::config::StorageConfig;
use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_core::traits::StorageProvider;
use folio_database::connection;
use folio_database::repositories::{FileRepository, FolderRepository};
use folio_entity::file::{CreateFile, File};
use folio_entity::folder::join_path;

use crate::presentation::bytes_to_human;
use crate::slug::slugify;

const OCTET_STREAM: &str = "application/octet-stream";

/// A single uploaded file.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// Client-side file name.
    pub file_name: String,
    /// Content type sent with the file, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
    /// Target folder (None for the storage root).
    pub folder_id: Option<i64>,
}

/// Handles file uploads and deletions.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Storage backend.
    storage: Arc<dyn StorageProvider>,
    /// Transliteration locale for file slugs.
    locale: String,
    /// Largest accepted upload in bytes.
    max_upload_size: u64,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        locale: impl Into<String>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
            locale: locale.into(),
            max_upload_size: config.max_upload_size_bytes,
        }
    }

    /// Stores an uploaded file and records it.
    ///
    /// The object is written under a generated name inside the folder's
    /// directory. If the row cannot be saved the object is removed again.
    pub async fn upload(&self, input: UploadInput) -> AppResult<File> {
        let file_name = input.file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("The file must have a name."));
        }
        let size = input.data.len() as u64;
        if size > self.max_upload_size {
            return Err(AppError::validation(format!(
                "The file may not be greater than {}.",
                bytes_to_human(self.max_upload_size)
            )));
        }

        let directory = match input.folder_id {
            Some(folder_id) => self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .map(|folder| folder.path())
                .ok_or_else(|| {
                    AppError::validation(format!("The selected folder {folder_id} does not exist"))
                })?,
            None => String::new(),
        };

        let file_id = Uuid::new_v4();
        let name_path = Path::new(file_name);
        let stored_name = match name_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => format!("{file_id}.{}", ext.to_lowercase()),
            _ => file_id.to_string(),
        };
        let storage_path = join_path(&directory, &stored_name);

        let stem = name_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        let mut slug = slugify(stem, &self.locale);
        if slug.is_empty() {
            slug = file_id.to_string();
        }

        let record = CreateFile {
            name: file_name.to_string(),
            slug,
            mime_type: detect_mime(input.content_type.as_deref(), file_name),
            url: self.storage.url(&storage_path),
            path: storage_path.clone(),
            size: input.data.len() as i64,
            folder_id: input.folder_id,
        };

        self.storage.write(&storage_path, input.data).await?;

        match self.insert(&record).await {
            Ok(file) => {
                info!(
                    file_id = file.id,
                    folder_id = ?file.folder_id,
                    path = %file.path,
                    size,
                    "File uploaded"
                );
                Ok(file)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(path = %storage_path, error = %cleanup, "Failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }

    /// Deletes a file record and its stored object.
    pub async fn delete(&self, file_id: i64) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;

        let mut tx = connection::begin(self.file_repo.pool()).await?;
        if let Err(e) = self.file_repo.delete(&mut tx, file.id).await {
            rollback_quietly(tx).await;
            return Err(e);
        }
        if let Err(e) = self.storage.delete(&file.path).await {
            warn!(file_id, path = %file.path, error = %e, "Storage delete failed, rolling back");
            rollback_quietly(tx).await;
            return Err(e);
        }
        if let Err(e) = connection::commit(tx).await {
            warn!(
                file_id,
                path = %file.path,
                error = %e,
                "Commit failed after the stored object was removed; row now points at a missing object"
            );
            return Err(e);
        }

        info!(file_id, path = %file.path, "File deleted");
        Ok(file)
    }

    async fn insert(&self, record: &CreateFile) -> AppResult<File> {
        let mut tx = connection::begin(self.file_repo.pool()).await?;
        let file = self.file_repo.create(&mut tx, record).await?;
        connection::commit(tx).await?;
        Ok(file)
    }
}

async fn rollback_quietly(tx: sqlx::Transaction<'static, sqlx::Sqlite>) {
    if let Err(e) = connection::rollback(tx).await {
        warn!(error = %e, "Rollback failed");
    }
}

/// MIME type from the declared content type, else from the file extension.
fn detect_mime(content_type: Option<&str>, file_name: &str) -> String {
    content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != OCTET_STREAM && ct.contains('/'))
        .map(str::to_string)
        .or_else(|| mime_guess::from_path(file_name).first_raw().map(str::to_string))
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
