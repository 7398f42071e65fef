//! # folio-database
//!
//! SQLite connection management, embedded migrations, and the folder and
//! file repositories.
//!
//! Read methods run against the pool. Write methods take a
//! `&mut SqliteConnection` so callers can group them in one transaction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
