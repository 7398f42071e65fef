//! # folio-api
//!
//! HTTP API layer for Folio built on Axum.
//!
//! Provides the folder and file endpoints, middleware (logging, CORS,
//! compression, body limit), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, build_state_with_storage, run_server};
pub use error::ApiError;
pub use state::AppState;
