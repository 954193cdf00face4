use accounts_core::types::DbId;
use async_trait::async_trait;

use super::{StoreError, UserStore};
use crate::models::user::{CreateUser, User};
use crate::repositories::UserRepo;
use crate::DbPool;

/// PostgreSQL unique_violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Constraint guarding one row per username.
const USERNAME_CONSTRAINT: &str = "uq_users_username";

/// [`UserStore`] backed by the `users` table via [`UserRepo`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn insert(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(|err| classify_insert_error(err, &input.username))
    }

    async fn update_password(
        &self,
        id: DbId,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::update_password(&self.pool, id, password_hash).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

/// Turn a unique violation on the username constraint into
/// [`StoreError::DuplicateUsername`]; everything else stays a database error.
fn classify_insert_error(err: sqlx::Error, username: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(USERNAME_CONSTRAINT)
        {
            tracing::debug!(username, "Insert lost a uniqueness race");
            return StoreError::DuplicateUsername(username.to_string());
        }
    }
    StoreError::Database(err)
}
