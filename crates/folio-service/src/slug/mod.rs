//! Slug generation for folder and file names.

pub mod service;
pub mod slugify;

pub use service::SlugService;
pub use slugify::{next_available_slug, slugify};
