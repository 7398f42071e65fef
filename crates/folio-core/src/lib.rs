//! # folio-core
//!
//! Core crate for Folio. Contains the storage backend trait, configuration
//! schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Folio crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
