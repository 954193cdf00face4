//! Route definitions for the `/user` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User account routes.
///
/// ```text
/// POST   /user/register  -> register
/// POST   /user           -> login
/// PUT    /user           -> update
/// DELETE /user           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(users::register))
        .route(
            "/user",
            post(users::login).put(users::update).delete(users::delete),
        )
}
