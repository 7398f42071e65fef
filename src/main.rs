//! Folio Server
//!
//! Main entry point that loads configuration, prepares the database and
//! starts the HTTP API.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt};

use folio_core::config::AppConfig;
use folio_core::error::{AppError, ErrorKind};
use folio_database::DatabasePool;
use folio_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("FOLIO_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e.detail(), "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    create_database_directory(&config.database.url).await?;

    let db_pool = DatabasePool::connect(&config.database).await?;
    run_migrations(db_pool.pool()).await?;

    folio_api::run_server(config, db_pool).await
}

/// SQLite creates the database file but not its parent directory.
async fn create_database_directory(url: &str) -> Result<(), AppError> {
    let location = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let location = location.split('?').next().unwrap_or_default();
    if location.is_empty() || location.contains(":memory:") {
        return Ok(());
    }

    let Some(parent) = Path::new(location).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    tokio::fs::create_dir_all(parent).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to create database directory '{}'", parent.display()),
            e,
        )
    })
}
