//! Maps domain `AppError` to HTTP responses.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use folio_core::error::{AppError, ErrorKind};

/// Message returned for every failed mutation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again later.";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
    /// Underlying failure of a mutation (detail text or error code).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-field validation messages (`null` when not field-specific).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorResponse,
}

impl ApiError {
    /// A 422 response with an optional per-field message map.
    pub fn invalid(message: impl Into<String>, fields: Option<serde_json::Value>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ApiErrorResponse {
                message: message.into(),
                error: None,
                errors: Some(fields.unwrap_or(serde_json::Value::Null)),
            },
        }
    }

    /// A 404 response.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ApiErrorResponse {
                message: message.into(),
                error: None,
                errors: None,
            },
        }
    }

    /// Failure of a mutating operation.
    ///
    /// Validation and not-found errors keep their own status. Anything else
    /// becomes a 400 with the generic message; `expose_details` decides
    /// whether `error` carries the error text or only its kind code.
    pub fn mutation(err: AppError, expose_details: bool) -> Self {
        match err.kind {
            ErrorKind::Validation => Self::invalid(err.message, None),
            ErrorKind::NotFound => Self::not_found(err.message),
            _ => {
                tracing::warn!(kind = %err.kind, error = %err.detail(), "Operation failed");
                let error = if expose_details {
                    err.detail()
                } else {
                    err.kind.code().to_string()
                };
                Self {
                    status: StatusCode::BAD_REQUEST,
                    body: ApiErrorResponse {
                        message: GENERIC_FAILURE_MESSAGE.to_string(),
                        error: Some(error),
                        errors: None,
                    },
                }
            }
        }
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body.
    pub fn body(&self) -> &ApiErrorResponse {
        &self.body
    }
}

/// Errors from read operations.
impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err.kind {
            ErrorKind::Validation => Self::invalid(err.message, None),
            ErrorKind::NotFound => Self::not_found(err.message),
            _ => {
                tracing::error!(kind = %err.kind, error = %err.detail(), "Internal server error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ApiErrorResponse {
                        message: GENERIC_FAILURE_MESSAGE.to_string(),
                        error: None,
                        errors: None,
                    },
                }
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid.", field.replace('_', " ")))
                })
                .collect();
            fields.insert(field, messages);
        }

        let message = fields
            .values()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "The given data was invalid.".to_string());

        Self::invalid(message, serde_json::to_value(fields).ok())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
