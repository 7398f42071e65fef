//! Storage provider implementations.

pub mod local;

use std::sync::Arc;

use folio_core::config::StorageConfig;
use folio_core::result::AppResult;
use folio_core::traits::StorageProvider;

pub use local::LocalStorageProvider;

/// Build the configured storage provider.
pub async fn from_config(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    let provider = LocalStorageProvider::new(&config.root_path, &config.public_url).await?;
    Ok(Arc::new(provider))
}
