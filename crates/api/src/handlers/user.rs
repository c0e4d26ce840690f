//! Handlers for the `/user` resource (register, login, logout, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use marquee_core::error::CoreError;
use marquee_core::validation::{validate_login, validate_registration};
use marquee_core::wire::{
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RegisterRequest,
};
use marquee_db::models::user::CreateUser;

use crate::auth::cookie::{removal_cookie, session_cookie};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_dummy_password, verify_password,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// POST /api/v1/user/register
///
/// Create an account. Does not log the user in; returns 201 Created.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let input = validate_registration(input)?;
    validate_password_strength(&input.password, state.config.min_password_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "This email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still win the race; the store reports it
    // as `StoreError::Duplicate`, which renders as 409 as well.
    let user = state
        .users
        .create(&CreateUser {
            full_name: input.full_name,
            email: input.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Account created successfully.")),
    ))
}

/// POST /api/v1/user/login
///
/// Verify credentials, set the session cookie, and return the public user.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let input = validate_login(input)?;

    let Some(user) = state.users.find_by_email(&input.email).await? else {
        // Same Argon2 cost as a wrong password, so timing does not reveal
        // which emails are registered.
        verify_dummy_password(&input.password);
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = generate_session_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.session_ttl_secs;

    tracing::info!(user_id = user.id, "User logged in");

    let jar = jar.add(session_cookie(token, expires_in, state.config.cookie_secure));
    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            message: format!("Welcome back {}", user.full_name),
            user: user.to_public(),
            expires_in,
        }),
    ))
}

/// GET /api/v1/user/logout
///
/// Overwrite the session cookie with an expired one. Needs no session and
/// always succeeds.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(removal_cookie(state.config.cookie_secure));
    (jar, Json(MessageResponse::ok("User logged out successfully.")))
}

/// GET /api/v1/user/me
///
/// Return the user behind the session cookie. A token for a user that no
/// longer exists is treated as unauthenticated.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<ProfileResponse>> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not logged in".into())))?;

    Ok(Json(ProfileResponse {
        success: true,
        message: "Authenticated".to_string(),
        user: user.to_public(),
    }))
}
