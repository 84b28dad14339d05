//! Request extractors shared by the services.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed its `validator` rules.
///
/// Both failure modes reject with [`AppError::InvalidBody`], so clients see a
/// single 400 shape whether the body is malformed or merely incomplete.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidBody(anyhow::anyhow!(e.body_text())))?;

        value
            .validate()
            .map_err(|e| AppError::InvalidBody(anyhow::anyhow!(e)))?;

        Ok(ValidatedJson(value))
    }
}
