//! Repository implementations for folders and files.

pub mod file;
pub mod folder;

pub use file::FileRepository;
pub use folder::FolderRepository;
