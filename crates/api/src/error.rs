use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::error::CoreError;
use marquee_core::wire::ErrorResponse;
use marquee_db::StoreError;

/// Message used for every 5xx so internal detail never reaches the client.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

pub(crate) const NOT_FOUND_MESSAGE: &str = "Resource not found";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence,
/// and adds HTTP-specific variants. Every variant renders as the uniform
/// `{ success: false, message, code }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marquee_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A user store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A malformed request (e.g. unparseable JSON).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message (logged, not returned).
    #[error("Internal error: {0}")]
    InternalError(String),

    /// A bare status produced by routing or a middleware layer (unknown
    /// method, timeout, panic), rendered with the failure body.
    #[error("HTTP {0}")]
    Status(StatusCode),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, core.code(), msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, core.code(), msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, core.code(), msg.clone())
                }
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, core.code(), msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::Store(StoreError::Duplicate { field }) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("This {field} is already registered"),
            ),
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
            AppError::Status(status) => status_failure(*status),
        };

        (status, axum::Json(ErrorResponse::new(code, message))).into_response()
    }
}

fn status_failure(status: StatusCode) -> (StatusCode, &'static str, String) {
    match status {
        StatusCode::NOT_FOUND => (status, "NOT_FOUND", NOT_FOUND_MESSAGE.to_string()),
        StatusCode::METHOD_NOT_ALLOWED => {
            (status, "METHOD_NOT_ALLOWED", "Method not allowed".to_string())
        }
        StatusCode::REQUEST_TIMEOUT => (status, "REQUEST_TIMEOUT", "Request timed out".to_string()),
        s if s.is_server_error() => {
            tracing::error!(status = %s, "Request failed without a response body");
            (s, "INTERNAL_ERROR", INTERNAL_MESSAGE.to_string())
        }
        s => (
            s,
            "BAD_REQUEST",
            s.canonical_reason().unwrap_or("Bad request").to_string(),
        ),
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}
