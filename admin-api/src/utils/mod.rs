pub mod password;

use axum::extract::{FromRequest, Request};
use axum::Json;
use panel_core::error::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `validator` checks after deserialization.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.to_string())))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
