use std::time::Duration;

/// Session Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the user resource, e.g. `http://localhost:8080/api/v1/user`.
    pub api_base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                              |
    /// |--------------------------------|--------------------------------------|
    /// | `MARQUEE_API_URL`              | `http://localhost:8080/api/v1/user`  |
    /// | `MARQUEE_REQUEST_TIMEOUT_SECS` | `30`                                 |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("MARQUEE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1/user".into());

        let request_timeout_secs: u64 = std::env::var("MARQUEE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(30);

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}
