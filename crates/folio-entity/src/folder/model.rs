//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::path::folder_path;

/// A folder in the hierarchy, mirrored by a directory in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: i64,
    /// Human-readable label.
    pub name: String,
    /// Path-safe identifier derived from `name`.
    pub slug: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<i64>,
    /// Resolved path of the parent directory, stored alongside `parent_id`.
    pub parent_folder: Option<String>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Relative path of this folder's directory in storage.
    pub fn path(&self) -> String {
        let parent = if self.is_root() {
            None
        } else {
            self.parent_folder.as_deref()
        };
        folder_path(parent, &self.slug)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Unique slug.
    pub slug: String,
    /// Parent folder (None for root).
    pub parent_id: Option<i64>,
    /// Resolved path of the parent (None for root).
    pub parent_folder: Option<String>,
}

/// New name and location of an existing folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// Folder name.
    pub name: String,
    /// Unique slug.
    pub slug: String,
    /// Parent folder (None for root).
    pub parent_id: Option<i64>,
    /// Resolved path of the parent (None for root).
    pub parent_folder: Option<String>,
}
