//! Account lifecycle operations: register, login, password update, delete.
//!
//! [`UserService`] owns no state of its own beyond its dependencies. Every call
//! runs to completion within the request that made it, and login state is never
//! persisted: a successful login only yields a token.

use std::sync::Arc;

use accounts_core::error::CoreError;
use accounts_core::validation::validate_credential;
use accounts_db::models::user::{CreateUser, User};
use accounts_db::store::UserStore;

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{burn_verification, hash_password, verify_password};
use crate::error::AppResult;

/// A bearer token handed out by [`UserService::login`].
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Orchestrates the user store, password hasher and token issuer.
pub struct UserService {
    store: Arc<dyn UserStore>,
    jwt: JwtConfig,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtConfig) -> Self {
        Self { store, jwt }
    }

    /// Create a new account.
    ///
    /// Fails with [`CoreError::DuplicateUsername`] if the name is taken, either
    /// by the up-front lookup or by the store's uniqueness constraint when two
    /// registrations race.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        validate_credential("username", username)?;
        validate_credential("password", password)?;

        if self.store.find_by_username(username).await?.is_some() {
            return Err(CoreError::DuplicateUsername(username.to_string()).into());
        }

        let password_hash = hash(password)?;
        let user = self
            .store
            .insert(&CreateUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a fresh access token. Touches nothing in
    /// the store beyond the lookup.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        let user = self.authenticate(username, password).await?;

        let access_token = generate_access_token(&user.username, true, &self.jwt)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))?;

        tracing::debug!(user_id = user.id, "Access token issued");
        Ok(IssuedToken {
            access_token,
            expires_in: self.jwt.expires_in_secs(),
        })
    }

    /// Replace the password of an account after checking the current one.
    pub async fn update(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<User> {
        validate_credential("new_password", new_password)?;
        let user = self.authenticate(username, current_password).await?;

        let password_hash = hash(new_password)?;
        // The row can disappear between the lookup and the update if a
        // concurrent delete wins; treat that like an unknown user.
        let updated = self
            .store
            .update_password(user.id, &password_hash)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        tracing::info!(user_id = updated.id, "User password updated");
        Ok(updated)
    }

    /// Delete an account after checking its password. Returns the removed row.
    pub async fn delete(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.authenticate(username, password).await?;

        if !self.store.delete(user.id).await? {
            return Err(CoreError::InvalidCredentials.into());
        }

        tracing::info!(user_id = user.id, username = %user.username, "User deleted");
        Ok(user)
    }

    /// Whether the backing store answers its liveness probe.
    pub async fn store_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "User store health check failed");
                false
            }
        }
    }

    /// Look up `username` and verify `password` against the stored hash.
    ///
    /// Unknown users and wrong passwords both yield
    /// [`CoreError::InvalidCredentials`], and both pay for one Argon2
    /// verification.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        validate_credential("username", username)?;
        validate_credential("password", password)?;

        let Some(user) = self.store.find_by_username(username).await? else {
            burn_verification(password);
            tracing::debug!(username, "Rejected credentials for unknown user");
            return Err(CoreError::InvalidCredentials.into());
        };

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
        if !valid {
            tracing::debug!(user_id = user.id, "Rejected credentials: password mismatch");
            return Err(CoreError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

fn hash(password: &str) -> Result<String, CoreError> {
    hash_password(password).map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))
}
