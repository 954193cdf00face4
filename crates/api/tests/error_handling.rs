//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use accounts_api::error::{AppError, DUPLICATE_USERNAME_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
use accounts_core::error::CoreError;
use accounts_db::store::StoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_422() {
    let err = AppError::Core(CoreError::Validation("username: is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "username: is required");
}

#[tokio::test]
async fn invalid_credentials_returns_401() {
    let (status, json) = error_to_response(CoreError::InvalidCredentials.into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"], INVALID_CREDENTIALS_MESSAGE);
}

/// The pre-check and the store's uniqueness race produce the same response.
#[tokio::test]
async fn duplicate_username_returns_400_from_either_layer() {
    let from_core =
        error_to_response(CoreError::DuplicateUsername("alice".into()).into()).await;
    let from_store =
        error_to_response(StoreError::DuplicateUsername("alice".into()).into()).await;

    assert_eq!(from_core, from_store);
    assert_eq!(from_core.0, StatusCode::BAD_REQUEST);
    assert_eq!(from_core.1["code"], "DUPLICATE_USERNAME");
    assert_eq!(from_core.1["error"], DUPLICATE_USERNAME_MESSAGE);
}

#[tokio::test]
async fn database_error_returns_500_and_sanitizes_message() {
    let err = AppError::Store(StoreError::Database(sqlx::Error::Protocol(
        "secret connection string leaked".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(
        !json.to_string().contains("secret"),
        "Database error response must not leak details"
    );
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::Internal("hash params corrupted".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
