use accounts_core::error::CoreError;
use accounts_db::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message returned for every credential failure, whether the user is
/// missing or the password is wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";

/// Message returned when registering a username that is already taken.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `accounts_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the user store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    msg.clone(),
                ),
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    INVALID_CREDENTIALS_MESSAGE.to_string(),
                ),
                CoreError::DuplicateUsername(_) => duplicate_username(),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::DuplicateUsername(_)) => duplicate_username(),
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn duplicate_username() -> (StatusCode, &'static str, String) {
    (
        StatusCode::BAD_REQUEST,
        "DUPLICATE_USERNAME",
        DUPLICATE_USERNAME_MESSAGE.to_string(),
    )
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
