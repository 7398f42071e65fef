//! Response DTOs.

use serde::{Deserialize, Serialize};

/// `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{ "data": ..., "message": ... }`, returned by successful mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataMessageResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> DataMessageResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a bulk folder delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFoldersResponse {
    pub message: String,
    /// Number of folder rows removed.
    pub deleted: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when every dependency is reachable, else `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `"ok"` or `"unavailable"`.
    pub database: String,
    /// `"ok"` or `"unavailable"`.
    pub storage: String,
}
