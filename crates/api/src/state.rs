use std::sync::Arc;

use accounts_db::store::{MemoryUserStore, PgUserStore, UserStore};
use accounts_db::DbPool;
use anyhow::Context;

use crate::config::ServerConfig;
use crate::service::UserService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Account operations, wired to the configured user store.
    pub users: Arc<UserService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around an explicit store handle.
    pub fn new(store: Arc<dyn UserStore>, config: ServerConfig) -> Self {
        let users = Arc::new(UserService::new(store, config.jwt.clone()));
        Self {
            users,
            config: Arc::new(config),
        }
    }
}

/// The user store chosen at startup.
pub struct StoreBackend {
    pub store: Arc<dyn UserStore>,
    /// Present when the store is PostgreSQL; closed on shutdown.
    pub pool: Option<DbPool>,
}

/// Connect to PostgreSQL and apply migrations, or fall back to an in-memory
/// store when no database URL is configured.
pub async fn connect_store(database_url: Option<&str>) -> anyhow::Result<StoreBackend> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set, using in-memory user store; accounts are lost on exit");
        return Ok(StoreBackend {
            store: Arc::new(MemoryUserStore::new()),
            pool: None,
        });
    };

    let pool = accounts_db::create_pool(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    accounts_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    accounts_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(StoreBackend {
        store: Arc::new(PgUserStore::new(pool.clone())),
        pool: Some(pool),
    })
}
