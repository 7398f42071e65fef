//! File upload and deletion.

pub mod service;

pub use service::{FileService, UploadInput};
