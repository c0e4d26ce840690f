//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use marquee_core::error::CoreError;
use marquee_core::types::DbId;

use crate::auth::cookie::token_from_jar;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the session cookie.
///
/// Use as a handler parameter to require authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = token_from_jar(&jar)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not logged in".into())))?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use axum::http::{header, Request};
    use marquee_db::MemoryUserStore;

    use super::*;
    use crate::auth::jwt::{generate_session_token, JwtConfig};
    use crate::config::ServerConfig;

    fn test_state() -> AppState {
        AppState {
            users: Arc::new(MemoryUserStore::new()),
            config: Arc::new(ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                frontend_url: "http://localhost:3000".into(),
                request_timeout_secs: 30,
                cookie_secure: false,
                min_password_length: 6,
                jwt: JwtConfig {
                    secret: "middleware-test-secret".into(),
                    session_ttl_secs: 60,
                },
            }),
        }
    }

    async fn extract(state: &AppState, cookie: Option<&str>) -> Result<AuthUser, AppError> {
        let mut builder = Request::builder().uri("/api/v1/user/me");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        let state = test_state();
        let err = extract(&state, None).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn valid_cookie_yields_user_id() {
        let state = test_state();
        let token = generate_session_token(9, &state.config.jwt).unwrap();
        let user = extract(&state, Some(&format!("token={token}"))).await.unwrap();
        assert_eq!(user.user_id, 9);
    }

    #[tokio::test]
    async fn token_signed_elsewhere_is_unauthorized() {
        let state = test_state();
        let foreign = JwtConfig {
            secret: "someone-else".into(),
            session_ttl_secs: 60,
        };
        let token = generate_session_token(9, &foreign).unwrap();
        let err = extract(&state, Some(&format!("token={token}"))).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Unauthorized(_)));
    }
}
