//! Merged folder/file listing returned by the show operation.

use serde::Serialize;

/// A sub-folder entry in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderItem {
    /// Always `"folder"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub parent_folder: Option<String>,
    /// Number of files found recursively under the folder's directory.
    pub items: usize,
    pub created_at: String,
}

/// A file entry in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileItem {
    /// Primary MIME category, e.g. `image` or `application`.
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub path: String,
    pub folder_id: Option<i64>,
    /// Human-readable size, e.g. `1.5 KiB`.
    pub size: String,
    pub created_at: String,
}

/// One entry of a merged listing, serialized without an extra wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListingItem {
    Folder(FolderItem),
    File(FileItem),
}

impl ListingItem {
    /// The `type` tag of this entry.
    pub fn kind(&self) -> &str {
        match self {
            Self::Folder(item) => &item.kind,
            Self::File(item) => &item.kind,
        }
    }

    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}

/// Combine folders and files into one listing, folders first.
///
/// Each group keeps its input order.
pub fn merge_listing(folders: Vec<FolderItem>, files: Vec<FileItem>) -> Vec<ListingItem> {
    folders
        .into_iter()
        .map(ListingItem::Folder)
        .chain(files.into_iter().map(ListingItem::File))
        .collect()
}
