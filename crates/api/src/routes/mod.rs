pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /user/register     register (public)
/// /user/login        login (public)
/// /user/logout       logout (public, idempotent)
/// /user/me           current user (session cookie)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/user", user::router())
}
