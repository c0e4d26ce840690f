/// Failures talking to the Auth Service.
///
/// A server-side rejection (4xx/5xx with a failure body) is not an error at
/// this level; it arrives as [`crate::ApiOutcome::Rejected`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure or timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx whose body is not the endpoint's success shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
