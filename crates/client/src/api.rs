//! Typed calls to the Auth Service's `/api/v1/user` endpoints.

use marquee_core::wire::{
    ErrorResponse, LoginRequest, LoginResponse, MessageResponse, ProfileResponse,
    RegisterRequest,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Result of a call that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// 2xx with the endpoint's success body.
    Success(T),
    /// Non-2xx. `message` is the server's failure message when the body was
    /// the uniform failure shape, `None` otherwise (e.g. a proxy error page).
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
}

impl<T> ApiOutcome<T> {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// HTTP client for the user resource.
///
/// Holds a cookie jar, so the session cookie set by `login` is sent on later
/// calls and cleared by `logout`, the way a browser would.
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl AuthApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `POST /register`
    pub async fn register(
        &self,
        input: &RegisterRequest,
    ) -> Result<ApiOutcome<MessageResponse>, ClientError> {
        let response = self.http.post(self.url("register")).json(input).send().await?;
        decode(response).await
    }

    /// `POST /login`. On success the jar holds the session cookie.
    pub async fn login(&self, input: &LoginRequest) -> Result<ApiOutcome<LoginResponse>, ClientError> {
        let response = self.http.post(self.url("login")).json(input).send().await?;
        decode(response).await
    }

    /// `GET /logout`. The server's expired cookie removes ours from the jar.
    pub async fn logout(&self) -> Result<ApiOutcome<MessageResponse>, ClientError> {
        let response = self.http.get(self.url("logout")).send().await?;
        decode(response).await
    }

    /// `GET /me`
    pub async fn me(&self) -> Result<ApiOutcome<ProfileResponse>, ClientError> {
        let response = self.http.get(self.url("me")).send().await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<ApiOutcome<T>, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if status.is_success() {
        return parse_success(&bytes).map(ApiOutcome::Success);
    }

    let message = serde_json::from_slice::<ErrorResponse>(&bytes)
        .ok()
        .map(|body| body.message);
    Ok(ApiOutcome::Rejected { status, message })
}

fn parse_success<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
