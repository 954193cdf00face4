use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use accounts_api::auth::jwt::JwtConfig;
use accounts_api::config::ServerConfig;
use accounts_api::router::build_app_router;
use accounts_api::state::AppState;
use accounts_core::types::DbId;
use accounts_db::models::user::{CreateUser, User};
use accounts_db::store::{MemoryUserStore, StoreError, UserStore};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Secret used to sign tokens in tests, so they can be decoded again.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build the full application router (same middleware stack as production)
/// around the given store.
pub fn build_test_app(store: Arc<dyn UserStore>) -> Router {
    let config = test_config();
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config).expect("test config must produce a router")
}

/// Application backed by a fresh in-memory store.
pub fn memory_app() -> Router {
    build_test_app(Arc::new(MemoryUserStore::new()))
}

// ---------------------------------------------------------------------------
// Store doubles
// ---------------------------------------------------------------------------

/// Wraps a [`MemoryUserStore`] and counts every call made to it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryUserStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.hit();
        self.inner.find_by_username(username).await
    }

    async fn insert(&self, input: &CreateUser) -> Result<User, StoreError> {
        self.hit();
        self.inner.insert(input).await
    }

    async fn update_password(
        &self,
        id: DbId,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        self.hit();
        self.inner.update_password(id, password_hash).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        self.hit();
        self.inner.delete(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Reads succeed against an in-memory store; every write fails with a
/// database error.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryUserStore,
}

fn storage_failure() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl UserStore for ReadOnlyStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.inner.find_by_username(username).await
    }

    async fn insert(&self, _input: &CreateUser) -> Result<User, StoreError> {
        Err(storage_failure())
    }

    async fn update_password(
        &self,
        _id: DbId,
        _password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        Err(storage_failure())
    }

    async fn delete(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(storage_failure())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(storage_failure())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a JSON request with the given method and return the response.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::DELETE, uri, body).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
