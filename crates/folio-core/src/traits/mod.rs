//! Core traits defined in `folio-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
