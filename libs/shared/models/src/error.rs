use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call through the Healthie GraphQL gateway.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (network, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response without a structured GraphQL error list.
    #[error("API error ({status}): {body}")]
    Http { status: StatusCode, body: String },

    /// The service answered with a GraphQL `errors` list.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Response carried no data")]
    MissingData,

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Http { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}
