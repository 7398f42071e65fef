//! Response resources for folders and files.

use serde::Serialize;

/// A folder row as returned by create and update, and nested in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub parent_folder: Option<String>,
    /// Resolved directory path in storage.
    pub path: String,
    pub created_at: String,
}

/// A root folder with its direct children and files eagerly loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderResource {
    #[serde(flatten)]
    pub folder: FolderSummary,
    pub children_count: usize,
    pub files_count: usize,
    pub children: Vec<FolderSummary>,
    pub files: Vec<FileResource>,
}

/// A file row with its computed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResource {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub mime_type: String,
    pub url: String,
    pub path: String,
    /// Size in bytes.
    pub size: i64,
    /// Size with binary units, e.g. `1.5 KiB`.
    pub size_human: String,
    pub folder_id: Option<i64>,
    pub created_at: String,
}
