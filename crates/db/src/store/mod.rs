//! The [`UserStore`] port: the only shared mutable resource behind the
//! account operations.
//!
//! Uniqueness of `username` is the store's responsibility. Callers may check
//! for an existing row first, but a concurrent insert that slips past that
//! check must still come back as [`StoreError::DuplicateUsername`].

use accounts_core::types::DbId;
use async_trait::async_trait;

use crate::models::user::{CreateUser, User};

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Failures reported by a [`UserStore`] adapter.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The username is already taken.
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Any other persistence failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence port for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user, enforcing username uniqueness.
    async fn insert(&self, input: &CreateUser) -> Result<User, StoreError>;

    /// Replace the stored hash. Returns `None` if the row no longer exists.
    async fn update_password(
        &self,
        id: DbId,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Remove a user. Returns `false` if the row no longer exists.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
