//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use folio_core::config::AppConfig;
use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_core::traits::StorageProvider;
use folio_database::DatabasePool;
use folio_database::repositories::{FileRepository, FolderRepository};
use folio_service::{FileService, FolderService, Presenter, SlugService, TimestampFormatter};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the state with the storage provider named in the configuration.
pub async fn build_state(config: AppConfig, db_pool: DatabasePool) -> AppResult<AppState> {
    let storage = folio_storage::from_config(&config.storage).await?;
    build_state_with_storage(config, db_pool, storage)
}

/// Builds the state around an existing storage provider.
pub fn build_state_with_storage(
    config: AppConfig,
    db_pool: DatabasePool,
    storage: Arc<dyn StorageProvider>,
) -> AppResult<AppState> {
    let folder_repo = Arc::new(FolderRepository::new(db_pool.pool().clone()));
    let file_repo = Arc::new(FileRepository::new(db_pool.pool().clone()));

    let presenter = Arc::new(Presenter::new(TimestampFormatter::new(
        &config.presentation,
    )?));
    let slugs = SlugService::new(Arc::clone(&folder_repo), &config.slug);

    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
        Arc::clone(&storage),
        slugs,
        Arc::clone(&presenter),
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&storage),
        config.slug.locale.clone(),
        &config.storage,
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        storage,
        presenter,
        folder_service,
        file_service,
    })
}

/// Runs the Folio server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, db_pool: DatabasePool) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config, db_pool.clone()).await?;
    info!(
        storage = state.storage.provider_type(),
        prefix = %state.config.server.api_prefix,
        "Application state initialized"
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    info!(%addr, "Folio server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });
    let server = async move { server.await };
    tokio::pin!(server);

    let drain_deadline = async move {
        if shutdown_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = &mut server => {
            result.map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;
        }
        () = drain_deadline => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, closing open connections");
        }
    }

    db_pool.close().await;
    info!("Folio server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutdown signal received");
}
