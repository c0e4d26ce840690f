use std::sync::Arc;

use marquee_db::UserStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// User persistence (Postgres in production, in-memory in tests).
    pub users: Arc<dyn UserStore>,
    /// Server configuration (cookie flags, token settings, validation limits).
    pub config: Arc<ServerConfig>,
}
