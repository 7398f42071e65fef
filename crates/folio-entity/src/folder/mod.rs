//! Folder domain entities.

pub mod model;
pub mod path;

pub use model::{CreateFolder, Folder, UpdateFolder};
pub use path::{folder_path, is_same_or_descendant, join_path};
