//! # folio-storage
//!
//! Storage provider implementations for Folio. Every folder owns a
//! directory under the storage root and every file is an object inside it.

pub mod providers;

pub use providers::{LocalStorageProvider, from_config};
