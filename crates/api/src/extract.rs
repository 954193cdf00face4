//! Request extractors.

use accounts_core::error::CoreError;
use accounts_core::validation;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that also runs [`Validate`] on the decoded value.
///
/// Every failure -- wrong content type, malformed JSON, missing or mistyped
/// fields, or a rule violation -- becomes [`CoreError::Validation`] (422), so
/// handlers only ever see well-formed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| validation::into_core_error(&errors))?;

        Ok(Self(value))
    }
}
