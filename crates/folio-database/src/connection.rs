//! SQLite connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::info;

use folio_core::config::DatabaseConfig;
use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;

/// Wrapper around the sqlx SQLite connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: SqlitePool,
}

impl DatabasePool {
    /// Create a new database pool from configuration.
    ///
    /// The database file is created if missing and foreign keys are enforced.
    /// An in-memory URL is limited to a single connection that never idles
    /// out, since every connection would otherwise see its own database.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Connecting to SQLite"
        );

        let in_memory = config.url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid database URL: {}", config.url),
                    e,
                )
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.connect_timeout_seconds));
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

        info!("Successfully connected to SQLite");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Return the underlying sqlx pool (consuming self).
    pub fn into_pool(self) -> SqlitePool {
        self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Begin a transaction on a pool.
pub async fn begin(pool: &SqlitePool) -> AppResult<Transaction<'static, Sqlite>> {
    pool.begin()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
}

/// Commit a transaction.
pub async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
}

/// Roll back a transaction explicitly.
pub async fn rollback(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    tx.rollback().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
    })
}
