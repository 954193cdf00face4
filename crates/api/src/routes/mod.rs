//! Route tree.

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// All account routes, mounted at the root.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(users::router())
}
