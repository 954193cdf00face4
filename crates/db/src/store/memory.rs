use std::collections::HashMap;

use accounts_core::types::DbId;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{StoreError, UserStore};
use crate::models::user::{CreateUser, User};

/// In-process [`UserStore`] keyed by username.
///
/// Uniqueness is checked under the same lock as the insert, so concurrent
/// registrations of one username resolve to exactly one winner.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    last_id: DbId,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.lock().await.users.get(username).cloned())
    }

    async fn insert(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.users.contains_key(&input.username) {
            return Err(StoreError::DuplicateUsername(input.username.clone()));
        }

        inner.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.last_id,
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        id: DbId,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.lock().await;
        let updated = inner.users.values_mut().find(|u| u.id == id).map(|user| {
            user.password_hash = password_hash.to_string();
            user.updated_at = Utc::now();
            user.clone()
        });
        Ok(updated)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let before = inner.users.len();
        inner.users.retain(|_, user| user.id != id);
        Ok(inner.users.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
