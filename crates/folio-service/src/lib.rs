//! # folio-service
//!
//! Business logic service layer for Folio. Each service orchestrates the
//! repositories and the storage provider to implement one use case, keeping
//! database rows and storage paths in step.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod file;
pub mod folder;
pub mod presentation;
pub mod slug;

pub use file::{FileService, UploadInput};
pub use folder::{DeleteFolders, FolderInput, FolderService};
pub use presentation::{Presenter, TimestampFormatter};
pub use slug::SlugService;
