//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An uploaded file stored inside a folder's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: i64,
    /// Original file name (including extension).
    pub name: String,
    /// Path-safe identifier derived from the file stem.
    pub slug: String,
    /// MIME type of the file.
    pub mime_type: String,
    /// Public URL of the stored object.
    pub url: String,
    /// Relative path within the storage backend.
    pub path: String,
    /// File size in bytes.
    pub size: i64,
    /// The folder containing this file (None at the storage root).
    pub folder_id: Option<i64>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Primary MIME category (the part before `/`), e.g. `image`.
    pub fn mime_category(&self) -> &str {
        match self.mime_type.split_once('/') {
            Some((primary, _)) if !primary.is_empty() => primary,
            _ => "file",
        }
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// Slug of the file stem.
    pub slug: String,
    /// MIME type.
    pub mime_type: String,
    /// Public URL.
    pub url: String,
    /// The path within the storage backend.
    pub path: String,
    /// File size in bytes.
    pub size: i64,
    /// The folder to place the file in.
    pub folder_id: Option<i64>,
}
