//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// Deserializes a JSON body and validates it.
///
/// Malformed bodies and failed rules are both rejected with a 422.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid(rejection.body_text(), None))?;
        value.validate()?;
        Ok(Self(value))
    }
}
