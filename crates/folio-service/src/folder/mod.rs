//! Folder management.

pub mod service;

pub use service::{DeleteFolders, FolderInput, FolderService};
