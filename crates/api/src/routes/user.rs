//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST /register -> register
/// POST /login    -> login (sets session cookie)
/// GET  /logout   -> logout (clears session cookie)
/// GET  /me       -> me (requires session cookie)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
        .route("/logout", get(user::logout))
        .route("/me", get(user::me))
}
