//! Handlers for the `/user` resource (register, login, update, delete).

use accounts_db::models::user::UserResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/register`, `POST /user` and `DELETE /user`.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(max = 128, message = "must be at most 128 characters"))]
    pub username: String,
    #[validate(length(max = 128, message = "must be at most 128 characters"))]
    pub password: String,
}

/// Request body for `PUT /user`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(max = 128, message = "must be at most 128 characters"))]
    pub username: String,
    #[validate(length(max = 128, message = "must be at most 128 characters"))]
    pub password: String,
    #[validate(length(max = 128, message = "must be at most 128 characters"))]
    pub new_password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /user/register
///
/// Create an account. Returns 201 with the public user view, 400 if the
/// username is taken.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .users
        .register(&input.username, &input.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /user
///
/// Log in with username + password. Returns a fresh access token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.users.login(&input.username, &input.password).await?;
    Ok(Json(TokenResponse {
        access_token: token.access_token,
        token_type: "Bearer",
        expires_in: token.expires_in,
    }))
}

/// PUT /user
///
/// Replace the password after checking the current one.
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .update(&input.username, &input.password, &input.new_password)
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /user
///
/// Delete the account after checking its password.
pub async fn delete(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CredentialsRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.delete(&input.username, &input.password).await?;
    Ok(Json(user.into()))
}
