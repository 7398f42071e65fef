//! Storage backend configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration for the local filesystem backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory every folder and file path is relative to.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Public base URL that stored paths are appended to.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Maximum upload size in bytes (default 100 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            public_url: default_public_url(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root_path() -> String {
    "./data/storage".to_string()
}

fn default_public_url() -> String {
    "/storage".to_string()
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MB
}
