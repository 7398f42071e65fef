//! Shapes folder and file rows into API responses.
//!
//! Computed fields (formatted timestamps, human-readable sizes, recursive
//! item counts) are filled in here so the services and handlers only deal
//! with entities.

pub mod datetime;
pub mod listing;
pub mod resource;
pub mod size;

use folio_entity::file::File;
use folio_entity::folder::Folder;

pub use datetime::TimestampFormatter;
pub use listing::{FileItem, FolderItem, ListingItem, merge_listing};
pub use resource::{FileResource, FolderResource, FolderSummary};
pub use size::bytes_to_human;

/// Builds response resources from entities.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    formatter: TimestampFormatter,
}

impl Presenter {
    /// Creates a presenter using the given timestamp formatter.
    pub fn new(formatter: TimestampFormatter) -> Self {
        Self { formatter }
    }

    pub fn folder_summary(&self, folder: &Folder) -> FolderSummary {
        FolderSummary {
            id: folder.id,
            name: folder.name.clone(),
            slug: folder.slug.clone(),
            parent_id: folder.parent_id,
            parent_folder: folder.parent_folder.clone(),
            path: folder.path(),
            created_at: self.formatter.format(&folder.created_at),
        }
    }

    pub fn file_resource(&self, file: &File) -> FileResource {
        FileResource {
            id: file.id,
            name: file.name.clone(),
            slug: file.slug.clone(),
            mime_type: file.mime_type.clone(),
            url: file.url.clone(),
            path: file.path.clone(),
            size: file.size,
            size_human: bytes_to_human(file.size.max(0) as u64),
            folder_id: file.folder_id,
            created_at: self.formatter.format(&file.created_at),
        }
    }

    /// A root folder together with its direct children and files.
    pub fn folder_resource(
        &self,
        folder: &Folder,
        children: &[Folder],
        files: &[File],
    ) -> FolderResource {
        FolderResource {
            folder: self.folder_summary(folder),
            children_count: children.len(),
            files_count: files.len(),
            children: children.iter().map(|c| self.folder_summary(c)).collect(),
            files: files.iter().map(|f| self.file_resource(f)).collect(),
        }
    }

    /// Listing entry for a sub-folder holding `items` files.
    pub fn folder_item(&self, folder: &Folder, items: usize) -> FolderItem {
        FolderItem {
            kind: "folder".to_string(),
            id: folder.id,
            name: folder.name.clone(),
            slug: folder.slug.clone(),
            parent_id: folder.parent_id,
            parent_folder: folder.parent_folder.clone(),
            items,
            created_at: self.formatter.format(&folder.created_at),
        }
    }

    /// Listing entry for a file.
    pub fn file_item(&self, file: &File) -> FileItem {
        FileItem {
            kind: file.mime_category().to_string(),
            id: file.id,
            name: file.name.clone(),
            slug: file.slug.clone(),
            url: file.url.clone(),
            path: file.path.clone(),
            folder_id: file.folder_id,
            size: bytes_to_human(file.size.max(0) as u64),
            created_at: self.formatter.format(&file.created_at),
        }
    }
}
